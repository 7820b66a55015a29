//! Palette quantization, with optional Floyd-Steinberg error diffusion.

use image::RgbaImage;

use crate::types::{Cell, ColorGrid, Colour, Palette};

use super::background::BackgroundMask;

/// Floyd-Steinberg kernel as `(dx, dy, weight)`:
///
/// ```text
///        *   7/16
///  3/16 5/16 1/16
/// ```
pub const FLOYD_STEINBERG: [(i32, i32, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// In-bounds diffusion targets for the pixel at `(x, y)`.
///
/// Taps that would land outside the buffer are dropped along with their
/// share of the error.
pub fn diffusion_targets(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize, f32)> {
    FLOYD_STEINBERG.into_iter().filter_map(move |(dx, dy, weight)| {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        (nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64)
            .then_some((nx as usize, ny as usize, weight))
    })
}

/// Map every non-background pixel to its nearest palette colour.
///
/// # Panics
///
/// Panics if the palette is empty; the pipeline rejects empty palettes
/// before reaching this point.
pub fn quantize(
    pixels: &RgbaImage,
    background: &BackgroundMask,
    palette: &Palette,
    dithering: bool,
) -> ColorGrid {
    assert!(!palette.is_empty(), "cannot quantize against an empty palette");

    if dithering {
        quantize_dithered(pixels, background, palette)
    } else {
        quantize_direct(pixels, background, palette)
    }
}

/// Direct per-pixel nearest-colour mapping.
fn quantize_direct(pixels: &RgbaImage, background: &BackgroundMask, palette: &Palette) -> ColorGrid {
    let (width, height) = (pixels.width() as usize, pixels.height() as usize);
    let mut grid = ColorGrid::new(height, width);

    for (x, y, pixel) in pixels.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        if background.contains(x, y) {
            continue;
        }
        if let Some(colour) = palette.nearest(Colour::from(*pixel)) {
            grid.set(y, x, Cell::Bead(colour));
        }
    }

    grid
}

/// Floyd-Steinberg error diffusion.
///
/// Pixels are processed left-to-right, top-to-bottom; the result depends on
/// that order. Background pixels receive the transparent cell and diffuse no
/// error.
fn quantize_dithered(pixels: &RgbaImage, background: &BackgroundMask, palette: &Palette) -> ColorGrid {
    let (width, height) = (pixels.width() as usize, pixels.height() as usize);
    let mut grid = ColorGrid::new(height, width);

    // Working buffer with f32 channels for error accumulation
    let mut buf: Vec<[f32; 3]> = pixels
        .pixels()
        .map(|p| Colour::from(*p).to_f32())
        .collect();

    for y in 0..height {
        for x in 0..width {
            if background.contains(x, y) {
                continue;
            }

            let current = buf[y * width + x].map(|v| v.clamp(0.0, 255.0));
            let Some(chosen) = palette.nearest_f32(current) else {
                continue;
            };
            grid.set(y, x, Cell::Bead(chosen));

            let target = chosen.to_f32();
            let err = [
                current[0] - target[0],
                current[1] - target[1],
                current[2] - target[2],
            ];

            for (nx, ny, weight) in diffusion_targets(x, y, width, height) {
                if background.contains(nx, ny) {
                    continue;
                }
                let n = &mut buf[ny * width + nx];
                n[0] += err[0] * weight;
                n[1] += err[1] * weight;
                n[2] += err[2] * weight;
            }
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn two_colour() -> Palette {
        Palette::new("bw", [Colour::BLACK, Colour::WHITE])
    }

    fn grey(width: u32, height: u32, level: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([level, level, level, 255]))
    }

    #[test]
    fn test_direct_maps_to_nearest() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let palette = Palette::new("rb", [Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255)]);

        let grid = quantize(&img, &BackgroundMask::empty(2, 1), &palette, false);

        assert_eq!(grid.get(0, 0), Some(Cell::Bead(Colour::rgb(255, 0, 0))));
        assert_eq!(grid.get(0, 1), Some(Cell::Bead(Colour::rgb(0, 0, 255))));
    }

    #[test]
    fn test_direct_uniform_grey_is_flat() {
        let grid = quantize(&grey(4, 4, 100), &BackgroundMask::empty(4, 4), &two_colour(), false);
        assert!(grid.cells().iter().all(|&c| c == Cell::Bead(Colour::BLACK)));
    }

    #[test]
    fn test_dithered_grey_mixes_colours() {
        let grid = quantize(&grey(8, 8, 128), &BackgroundMask::empty(8, 8), &two_colour(), true);
        let counts = grid.colour_counts();
        let black = counts[&Colour::BLACK];
        let white = counts[&Colour::WHITE];
        assert_eq!(black + white, 64);
        // Mid grey should dither to roughly half and half
        assert!((24..=40).contains(&white), "white = {}", white);
    }

    #[test]
    fn test_dithered_first_pixel_error_goes_right() {
        // 100 -> black, error +100; right neighbour gets 100 + 43.75 = 143.75 -> white
        let grid = quantize(&grey(2, 1, 100), &BackgroundMask::empty(2, 1), &two_colour(), true);
        assert_eq!(grid.get(0, 0), Some(Cell::Bead(Colour::BLACK)));
        assert_eq!(grid.get(0, 1), Some(Cell::Bead(Colour::WHITE)));
    }

    #[test]
    fn test_dithered_is_deterministic() {
        let mut img = RgbaImage::new(9, 7);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgba([(x * 28) as u8, (y * 36) as u8, ((x + y) * 15) as u8, 255]);
        }
        let palette = crate::types::BuiltinPalettes::mini();
        let mask = BackgroundMask::empty(9, 7);
        assert_eq!(
            quantize(&img, &mask, &palette, true),
            quantize(&img, &mask, &palette, true)
        );
    }

    #[test]
    fn test_background_pixels_are_transparent() {
        let img = grey(3, 3, 128);
        let mut mask = BackgroundMask::empty(3, 3);
        mask.insert(0, 0);
        mask.insert(2, 2);

        for dithering in [false, true] {
            let grid = quantize(&img, &mask, &two_colour(), dithering);
            assert_eq!(grid.get(0, 0), Some(Cell::Transparent));
            assert_eq!(grid.get(2, 2), Some(Cell::Transparent));
            assert_eq!(grid.bead_count(), 7);
        }
    }

    #[test]
    fn test_background_pixel_diffuses_no_error() {
        // With the first pixel masked, the second sees its own value only.
        let img = grey(2, 1, 100);
        let mut mask = BackgroundMask::empty(2, 1);
        mask.insert(0, 0);
        let grid = quantize(&img, &mask, &two_colour(), true);
        assert_eq!(grid.get(0, 1), Some(Cell::Bead(Colour::BLACK)));
    }

    #[test]
    fn test_diffusion_interior_weights_sum_to_one() {
        let total: f32 = diffusion_targets(2, 2, 5, 5).map(|(_, _, w)| w).sum();
        assert!((total - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_diffusion_drops_out_of_bounds_taps() {
        // Bottom-right corner has nowhere to send error
        assert_eq!(diffusion_targets(4, 4, 5, 5).count(), 0);
        // Left edge loses the below-left tap
        let left: Vec<_> = diffusion_targets(0, 0, 5, 5).collect();
        assert_eq!(left, vec![(1, 0, 7.0 / 16.0), (0, 1, 5.0 / 16.0), (1, 1, 1.0 / 16.0)]);
        // Last row only pushes right
        let last_row: Vec<_> = diffusion_targets(1, 4, 5, 5).collect();
        assert_eq!(last_row, vec![(2, 4, 7.0 / 16.0)]);
    }

    #[test]
    fn test_diffusion_targets_stay_in_bounds() {
        for y in 0..3 {
            for x in 0..4 {
                for (nx, ny, _) in diffusion_targets(x, y, 4, 3) {
                    assert!(nx < 4 && ny < 3);
                    // Only unvisited pixels receive error
                    assert!(ny > y || (ny == y && nx > x));
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "empty palette")]
    fn test_empty_palette_panics() {
        let palette = Palette::new("none", []);
        quantize(&grey(1, 1, 0), &BackgroundMask::empty(1, 1), &palette, false);
    }
}

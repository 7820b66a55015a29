//! Aspect-preserving downscale to the bead grid resolution.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Target `(width, height)` for an image of `width x height` whose longer
/// side may not exceed `max_cells`.
///
/// Images already within bounds keep their size; there is no upscaling.
/// The short side is scaled by the same ratio, rounded, and floored at 1.
pub fn target_size(width: u32, height: u32, max_cells: u32) -> (u32, u32) {
    let long = width.max(height);
    if long <= max_cells {
        return (width, height);
    }

    let ratio = max_cells as f64 / long as f64;
    let scale = |side: u32| ((side as f64 * ratio).round() as u32).max(1);

    if width >= height {
        (max_cells, scale(height))
    } else {
        (scale(width), max_cells)
    }
}

/// Resample an image to its grid resolution as an RGBA pixel buffer.
pub fn resample(image: &DynamicImage, max_cells: u32) -> RgbaImage {
    let rgba = image.to_rgba8();
    let (width, height) = target_size(rgba.width(), rgba.height(), max_cells);

    if (width, height) == rgba.dimensions() {
        return rgba;
    }

    imageops::resize(&rgba, width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_target_size_landscape() {
        assert_eq!(target_size(20, 10, 10), (10, 5));
    }

    #[test]
    fn test_target_size_portrait() {
        assert_eq!(target_size(30, 90, 45), (15, 45));
    }

    #[test]
    fn test_target_size_within_bounds_unchanged() {
        assert_eq!(target_size(8, 6, 10), (8, 6));
        assert_eq!(target_size(10, 10, 10), (10, 10));
    }

    #[test]
    fn test_target_size_rounds_short_side() {
        // 7 * (10 / 15) = 4.67
        assert_eq!(target_size(15, 7, 10), (10, 5));
        // 3 * (10 / 40) = 0.75
        assert_eq!(target_size(40, 3, 10), (10, 1));
    }

    #[test]
    fn test_target_size_floors_at_one() {
        assert_eq!(target_size(1000, 1, 10), (10, 1));
        assert_eq!(target_size(1, 1000, 10), (1, 10));
    }

    #[test]
    fn test_resample_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([9, 9, 9, 255])));
        let out = resample(&img, 10);
        assert_eq!(out.dimensions(), (10, 5));
        // Uniform input stays uniform
        assert!(out.pixels().all(|p| p.0 == [9, 9, 9, 255]));
    }

    #[test]
    fn test_resample_small_image_is_untouched() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let out = resample(&DynamicImage::ImageRgba8(img.clone()), 48);
        assert_eq!(out, img);
    }
}

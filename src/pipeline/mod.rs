//! Image-to-grid conversion.
//!
//! Resample to grid resolution, optionally segment the background, quantize
//! to the palette, then rasterize the grid for display. Each run owns its
//! pixel buffer and background mask; only the [`Pattern`] survives.

pub mod background;
pub mod quantize;
pub mod resample;

use image::{DynamicImage, RgbaImage};

use crate::config::Settings;
use crate::error::{BeadError, Result};
use crate::render::{bitmap_size, rasterize, too_large, RenderOptions};
use crate::types::{ColorGrid, ColourCounts, PaletteStore};

pub use background::{segment_background, BackgroundMask};
pub use quantize::quantize;
pub use resample::{resample, target_size};

/// The result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// The bead grid at resampled resolution.
    pub grid: ColorGrid,
    /// The grid rendered at `cell_size` pixels per bead.
    pub bitmap: RgbaImage,
    /// Beads per colour in `grid`.
    pub counts: ColourCounts,
}

impl Pattern {
    /// Build a pattern from a grid, rendering it and counting colours.
    pub fn from_grid(grid: ColorGrid, options: RenderOptions) -> Result<Self> {
        let bitmap = rasterize(&grid, options)?;
        let counts = grid.colour_counts();
        Ok(Self {
            grid,
            bitmap,
            counts,
        })
    }
}

/// Convert an image into a bead pattern.
///
/// Fails without a partial result on a zero-area image, an unknown or empty
/// palette, out-of-range settings, or a bitmap too large to render.
pub fn generate(image: &DynamicImage, settings: &Settings, store: &PaletteStore) -> Result<Pattern> {
    settings.validate(store)?;

    if image.width() == 0 || image.height() == 0 {
        return Err(BeadError::Input {
            message: format!("Image has zero area ({}x{})", image.width(), image.height()),
            help: None,
        });
    }

    let palette = store.palette(&settings.palette_name)?;
    if palette.is_empty() {
        return Err(BeadError::Input {
            message: format!("Palette '{}' is empty", palette.name),
            help: Some("Add at least one colour to the palette".to_string()),
        });
    }

    let (cols, rows) = target_size(image.width(), image.height(), settings.max_cells);
    if bitmap_size(cols as usize, rows as usize, settings.cell_size).is_none() {
        return Err(too_large(cols as usize, rows as usize, settings.cell_size));
    }

    let pixels = resample(image, settings.max_cells);

    let background = if settings.remove_background {
        segment_background(&pixels, settings.background_threshold)
    } else {
        BackgroundMask::empty(pixels.width() as usize, pixels.height() as usize)
    };

    let grid = quantize(&pixels, &background, palette, settings.dithering);

    Pattern::from_grid(grid, settings.render_options())
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert them.
pub fn generate_from_bytes(bytes: &[u8], settings: &Settings, store: &PaletteStore) -> Result<Pattern> {
    let image = image::load_from_memory(bytes).map_err(|e| BeadError::Input {
        message: format!("Failed to decode image: {}", e),
        help: Some("Supported formats include PNG, JPEG, GIF, BMP and WebP".to_string()),
    })?;
    generate(&image, settings, store)
}

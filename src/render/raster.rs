//! Grid rasterizer - renders a bead grid to an RGBA bitmap.

use image::{Rgba, RgbaImage};

use crate::error::{BeadError, Result};
use crate::types::{Cell, ColorGrid, Colour};

/// Opacity of the black grid-line stroke, out of 255.
const GRID_LINE_ALPHA: u32 = 51;

/// Blocks smaller than this are left unstroked; the outline would cover the
/// whole bead.
const MIN_STROKED_CELL: u32 = 3;

/// Largest bitmap `rasterize` will allocate, in pixels (1 GiB of RGBA).
pub const MAX_BITMAP_PIXELS: u64 = 1 << 28;

/// How to render a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per bead along each axis.
    pub cell_size: u32,
    /// Outline each bead.
    pub grid_lines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 12,
            grid_lines: true,
        }
    }
}

/// Bitmap dimensions for a `cols` x `rows` grid at `cell_size` pixels per
/// bead, or `None` if either side overflows `u32` or the total exceeds
/// [`MAX_BITMAP_PIXELS`].
pub fn bitmap_size(cols: usize, rows: usize, cell_size: u32) -> Option<(u32, u32)> {
    let scale = cell_size.max(1);
    let width = u32::try_from(cols).ok()?.checked_mul(scale)?;
    let height = u32::try_from(rows).ok()?.checked_mul(scale)?;
    if width as u64 * height as u64 > MAX_BITMAP_PIXELS {
        return None;
    }
    Some((width, height))
}

/// Render a grid at `cell_size` pixels per bead.
///
/// Transparent cells stay fully transparent (no fill, no outline); bead
/// cells are fully opaque. The output is `cols * cell_size` by
/// `rows * cell_size`. A `cell_size` of 0 is treated as 1. Fails if the
/// bitmap would be larger than [`MAX_BITMAP_PIXELS`].
pub fn rasterize(grid: &ColorGrid, options: RenderOptions) -> Result<RgbaImage> {
    let scale = options.cell_size.max(1);
    let (width, height) = bitmap_size(grid.cols(), grid.rows(), scale)
        .ok_or_else(|| too_large(grid.cols(), grid.rows(), scale))?;

    let mut img = RgbaImage::new(width, height);
    let stroke = options.grid_lines && scale >= MIN_STROKED_CELL;

    for (row, col, cell) in grid.iter_cells() {
        let Cell::Bead(colour) = cell else {
            continue;
        };

        let fill = Rgba(colour.opaque().to_rgba());
        let edge = Rgba(darken(colour).to_rgba());
        let (x0, y0) = (col as u32 * scale, row as u32 * scale);

        for sy in 0..scale {
            for sx in 0..scale {
                let on_edge = sx == 0 || sy == 0 || sx == scale - 1 || sy == scale - 1;
                let px = if stroke && on_edge { edge } else { fill };
                img.put_pixel(x0 + sx, y0 + sy, px);
            }
        }
    }

    Ok(img)
}

pub(crate) fn too_large(cols: usize, rows: usize, cell_size: u32) -> BeadError {
    BeadError::Config {
        message: format!(
            "A {}x{} grid at cellSize {} is too large to render",
            cols, rows, cell_size
        ),
        help: Some("Lower cellSize or maxCells".to_string()),
    }
}

/// Composite the grid-line stroke (black at `GRID_LINE_ALPHA`) over a bead.
fn darken(colour: Colour) -> Colour {
    let keep = 255 - GRID_LINE_ALPHA;
    let blend = |c: u8| ((c as u32 * keep + 127) / 255) as u8;
    Colour::rgb(blend(colour.r), blend(colour.g), blend(colour.b))
}

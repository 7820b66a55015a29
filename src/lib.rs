//! beadwork - image to bead pattern conversion
//!
//! Resamples an image to a bead grid, optionally strips the border-connected
//! background, quantizes to a fixed palette (with optional Floyd-Steinberg
//! dithering), and renders the grid as an RGBA bitmap. A [`Session`] keeps
//! the canonical pattern and supports hand edits on a copy of the grid.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod types;

pub use config::{Config, Settings, CONFIG_FILENAME};
pub use editor::{GridEditor, Tool};
pub use error::{BeadError, Result};
pub use pipeline::{generate, generate_from_bytes, target_size, Pattern};
pub use render::{bitmap_size, encode_png, rasterize, write_png, RenderOptions};
pub use session::{RunTicket, Session};
pub use types::{BuiltinPalettes, Cell, ColorGrid, Colour, ColourCounts, Palette, PaletteStore};

/// Bead counts per colour for a grid, recomputed from scratch.
pub fn colour_counts(grid: &ColorGrid) -> ColourCounts {
    grid.colour_counts()
}

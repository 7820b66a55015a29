//! Rendering module for beadwork.
//!
//! Turns a bead grid into a magnified RGBA bitmap and writes it as PNG.

mod png;
mod raster;

pub use png::{encode_png, write_png};
pub use raster::{bitmap_size, rasterize, RenderOptions, MAX_BITMAP_PIXELS};
pub(crate) use raster::too_large;

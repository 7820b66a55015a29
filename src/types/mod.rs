//! Core domain types for beadwork.
//!
//! - `Colour` - RGBA colour values
//! - `Palette` / `PaletteStore` - ordered bead colour sets and lookup
//! - `ColorGrid` - the bead grid produced by the pipeline
//!
//! Names use British spelling throughout except `ColorGrid` and
//! `PaletteStore::colors`, which keep the spelling of the public pattern API.

mod builtin;
mod colour;
mod grid;
mod palette;

pub use builtin::BuiltinPalettes;
pub use colour::Colour;
pub use grid::{Cell, ColorGrid, ColourCounts};
pub use palette::{Palette, PaletteStore};

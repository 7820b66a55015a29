//! PNG output for rendered patterns.
//!
//! Alpha is written through untouched, so background beads stay fully
//! transparent in the file.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{BeadError, Result};

/// Encode a bitmap as PNG bytes.
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    bitmap
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| BeadError::Input {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;
    Ok(bytes.into_inner())
}

/// Write a bitmap to a PNG file.
pub fn write_png(bitmap: &RgbaImage, path: &Path) -> Result<()> {
    bitmap
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| BeadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}

//! Manual grid editing.
//!
//! Entering edit mode deep-copies the canonical grid into an edit buffer.
//! Tools mutate only the buffer; leaving edit mode either hands the buffer
//! back for commit or drops it.

use std::fmt;
use std::str::FromStr;

use crate::error::{BeadError, Result};
use crate::types::{Cell, ColorGrid, Colour, Palette};

/// A single-cell editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint the selected colour.
    #[default]
    Add,
    /// Clear to transparent.
    Erase,
    /// Select the colour under the cursor, then switch to `Add`. A colour
    /// outside the current palette selects its nearest palette colour.
    Pick,
}

impl FromStr for Tool {
    type Err = BeadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "add" | "pen" => Ok(Tool::Add),
            "erase" | "eraser" => Ok(Tool::Erase),
            "pick" | "picker" => Ok(Tool::Pick),
            _ => Err(BeadError::Usage {
                message: format!("Unknown tool: {}", s),
                help: Some("Use add, erase, or pick".to_string()),
            }),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Add => write!(f, "add"),
            Tool::Erase => write!(f, "erase"),
            Tool::Pick => write!(f, "pick"),
        }
    }
}

/// Editor state: Viewing when `buffer` is `None`, Editing otherwise.
#[derive(Debug, Clone)]
pub struct GridEditor {
    buffer: Option<ColorGrid>,
    tool: Tool,
    selected: Colour,
    palette: Palette,
}

impl GridEditor {
    /// A viewing-state editor whose selection is drawn from `palette`.
    ///
    /// The first palette colour starts selected.
    pub fn new(palette: Palette) -> Self {
        let selected = palette.colours().first().copied().unwrap_or(Colour::BLACK);
        Self {
            buffer: None,
            tool: Tool::default(),
            selected,
            palette,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    /// The edit buffer, while editing.
    pub fn buffer(&self) -> Option<&ColorGrid> {
        self.buffer.as_ref()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn selected_colour(&self) -> Colour {
        self.selected
    }

    /// Select a colour for the add tool. It must be in the current palette.
    pub fn select_colour(&mut self, colour: Colour) -> Result<()> {
        if !self.palette.contains(colour) {
            return Err(BeadError::Usage {
                message: format!("{} is not in palette '{}'", colour, self.palette.name),
                help: None,
            });
        }
        self.selected = colour.opaque();
        Ok(())
    }

    /// The palette edits draw from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switch palettes. A selection missing from the new palette falls back
    /// to its first colour.
    pub fn set_palette(&mut self, palette: Palette) {
        if !palette.contains(self.selected) {
            self.selected = palette.colours().first().copied().unwrap_or(self.selected);
        }
        self.palette = palette;
    }

    /// Viewing -> Editing, copying `grid` into the edit buffer.
    ///
    /// Already editing: the existing buffer is kept.
    pub fn enter(&mut self, grid: &ColorGrid) {
        if self.buffer.is_none() {
            self.buffer = Some(grid.clone());
        }
    }

    /// Apply the active tool at `(row, col)`.
    ///
    /// Returns whether the buffer or selection changed. Out-of-range targets
    /// are ignored.
    pub fn apply(&mut self, row: usize, col: usize) -> Result<bool> {
        let buffer = self.buffer.as_mut().ok_or_else(not_editing)?;

        match self.tool {
            Tool::Add => Ok(buffer.set(row, col, Cell::Bead(self.selected))),
            Tool::Erase => Ok(buffer.set(row, col, Cell::Transparent)),
            Tool::Pick => match buffer.get(row, col) {
                Some(Cell::Bead(colour)) => {
                    // Cells from an earlier palette map onto the current one
                    self.selected = self.palette.nearest(colour).unwrap_or(self.selected);
                    self.tool = Tool::Add;
                    Ok(true)
                }
                _ => Ok(false),
            },
        }
    }

    /// Editing -> Viewing, returning the buffer for the caller to commit.
    pub fn finish(&mut self) -> Result<ColorGrid> {
        self.buffer.take().ok_or_else(not_editing)
    }

    /// Editing -> Viewing, dropping the buffer.
    pub fn discard(&mut self) -> Result<()> {
        self.finish().map(drop)
    }

    /// Drop any buffer without checking state; used when a new run replaces
    /// the canonical grid.
    pub(crate) fn reset(&mut self) {
        self.buffer = None;
    }
}

fn not_editing() -> BeadError {
    BeadError::Usage {
        message: "Not in edit mode".to_string(),
        help: Some("Call enter_edit first".to_string()),
    }
}

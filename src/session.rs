//! An interactive pattern session.
//!
//! Holds the canonical pattern, the settings it was generated with, and the
//! grid editor. Runs are ticketed so a result from a superseded run is
//! dropped instead of replacing newer output.

use image::DynamicImage;

use crate::config::Settings;
use crate::editor::{GridEditor, Tool};
use crate::error::{BeadError, Result};
use crate::pipeline::{generate, Pattern};
use crate::render::encode_png;
use crate::types::{ColorGrid, Colour, ColourCounts, PaletteStore};

/// Identifies one scheduled pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

/// Pattern state plus editing for a single source image.
#[derive(Debug)]
pub struct Session {
    store: PaletteStore,
    settings: Settings,
    pattern: Option<Pattern>,
    editor: GridEditor,
    latest: u64,
}

impl Session {
    /// Create a session with validated settings and no pattern yet.
    pub fn new(store: PaletteStore, settings: Settings) -> Result<Self> {
        settings.validate(&store)?;
        let palette = store.palette(&settings.palette_name)?.clone();
        Ok(Self {
            store,
            settings,
            pattern: None,
            editor: GridEditor::new(palette),
            latest: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings used by the next run and by commits.
    ///
    /// The current pattern is left alone until the caller regenerates.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate(&self.store)?;
        let palette = self.store.palette(&settings.palette_name)?.clone();
        self.editor.set_palette(palette);
        self.settings = settings;
        Ok(())
    }

    pub fn store(&self) -> &PaletteStore {
        &self.store
    }

    /// The canonical pattern, once a run has completed.
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn grid(&self) -> Option<&ColorGrid> {
        self.pattern.as_ref().map(|p| &p.grid)
    }

    pub fn counts(&self) -> Option<&ColourCounts> {
        self.pattern.as_ref().map(|p| &p.counts)
    }

    /// Start a new run, superseding any run still in flight.
    pub fn schedule(&mut self) -> RunTicket {
        self.latest += 1;
        RunTicket(self.latest)
    }

    /// Whether `ticket` is still the most recent run.
    pub fn is_current(&self, ticket: RunTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a run's result.
    ///
    /// Results from superseded runs are discarded and return `Ok(false)`.
    /// A failed current run leaves the previous pattern in place. A new
    /// pattern ends any edit in progress.
    pub fn complete(&mut self, ticket: RunTicket, result: Result<Pattern>) -> Result<bool> {
        if !self.is_current(ticket) {
            return Ok(false);
        }
        let pattern = result?;
        self.editor.reset();
        self.pattern = Some(pattern);
        Ok(true)
    }

    /// Run the pipeline on `image` with the current settings.
    pub fn regenerate(&mut self, image: &DynamicImage) -> Result<()> {
        let ticket = self.schedule();
        let result = generate(image, &self.settings, &self.store);
        self.complete(ticket, result).map(drop)
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    /// Viewing -> Editing. Requires a generated pattern.
    pub fn enter_edit(&mut self) -> Result<()> {
        let pattern = self.pattern.as_ref().ok_or_else(|| BeadError::Usage {
            message: "No pattern to edit".to_string(),
            help: Some("Generate a pattern first".to_string()),
        })?;
        self.editor.enter(&pattern.grid);
        Ok(())
    }

    /// Apply the active tool to one cell of the edit buffer.
    pub fn apply_tool(&mut self, row: usize, col: usize) -> Result<()> {
        self.editor.apply(row, col).map(drop)
    }

    /// The grid being edited, while in edit mode.
    pub fn edit_buffer(&self) -> Option<&ColorGrid> {
        self.editor.buffer()
    }

    /// Editing -> Viewing, making the edit buffer canonical.
    ///
    /// The bitmap and colour counts are rebuilt from the committed grid. If
    /// rendering fails the session stays in edit mode with the buffer intact.
    pub fn commit(&mut self) -> Result<()> {
        let Some(buffer) = self.editor.buffer() else {
            return self.editor.finish().map(drop);
        };
        let pattern = Pattern::from_grid(buffer.clone(), self.settings.render_options())?;
        self.editor.finish()?;
        self.pattern = Some(pattern);
        Ok(())
    }

    /// Editing -> Viewing, dropping the edits.
    pub fn cancel(&mut self) -> Result<()> {
        self.editor.discard()
    }

    pub fn tool(&self) -> Tool {
        self.editor.tool()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.editor.set_tool(tool);
    }

    pub fn selected_colour(&self) -> Colour {
        self.editor.selected_colour()
    }

    /// Select the add colour from the current palette.
    pub fn select_colour(&mut self, colour: Colour) -> Result<()> {
        self.editor.select_colour(colour)
    }

    /// The current bitmap as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let pattern = self.pattern.as_ref().ok_or_else(|| BeadError::Usage {
            message: "No pattern to export".to_string(),
            help: None,
        })?;
        encode_png(&pattern.bitmap)
    }
}

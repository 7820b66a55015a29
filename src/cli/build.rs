//! Build command implementation.
//!
//! Converts one image into a bead pattern PNG, optionally rebuilding when the
//! image or config changes.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Settings;
use crate::error::{BeadError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{generate_from_bytes, Pattern};
use crate::render::write_png;

use super::{load_config, watch};

/// Convert an image into a bead pattern PNG
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Image to convert
    #[arg(required = true)]
    pub image: PathBuf,

    /// Output PNG (default: <image>.beads.png next to the input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Config file (default: ./beadwork.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum beads along the longer side
    #[arg(long)]
    pub max_cells: Option<u32>,

    /// Rendered pixels per bead
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Palette name
    #[arg(long)]
    pub palette: Option<String>,

    /// Outline each bead (--grid-lines=false to turn off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub grid_lines: Option<bool>,

    /// Floyd-Steinberg dithering (--dither=false to turn off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub dither: Option<bool>,

    /// Make the border-connected background transparent
    /// (--remove-background=false to turn off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub remove_background: Option<bool>,

    /// Background tolerance, 0-100
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Print bead counts per colour as JSON on stdout
    #[arg(long)]
    pub counts: bool,

    /// Rebuild when the image or config changes
    #[arg(long)]
    pub watch: bool,
}

impl BuildArgs {
    /// Overlay command-line flags on config settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(n) = self.max_cells {
            settings.max_cells = n;
        }
        if let Some(n) = self.cell_size {
            settings.cell_size = n;
        }
        if let Some(name) = &self.palette {
            settings.palette_name = name.clone();
        }
        if let Some(on) = self.grid_lines {
            settings.show_grid_lines = on;
        }
        if let Some(t) = self.threshold {
            settings.background_threshold = t;
        }
        if let Some(on) = self.dither {
            settings.dithering = on;
        }
        if let Some(on) = self.remove_background {
            settings.remove_background = on;
        }
        settings
    }

    /// Where the PNG goes.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.image))
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let output = args.output_path();
    build_once(&args, &output, printer)?;

    if args.watch {
        let (_, config_path) = load_config(args.config.as_deref())?;
        let mut files = vec![args.image.clone()];
        files.extend(config_path);

        watch::watch(&files, printer, || build_once(&args, &output, printer).map(drop))?;
    }

    Ok(())
}

/// One full run: load config, decode, generate, write.
fn build_once(args: &BuildArgs, output: &Path, printer: &Printer) -> Result<Pattern> {
    let (config, _) = load_config(args.config.as_deref())?;
    let store = config.palette_store()?;
    let settings = args.apply(config.settings);

    let bytes = fs::read(&args.image).map_err(|e| BeadError::Io {
        path: args.image.clone(),
        message: format!("Failed to read image: {}", e),
    })?;

    let pattern = generate_from_bytes(&bytes, &settings, &store)?;
    write_png(&pattern.bitmap, output)?;

    printer.status(
        "Generated",
        &format!(
            "{} ({}x{} grid, {}, {})",
            display_path(output),
            pattern.grid.cols(),
            pattern.grid.rows(),
            plural(pattern.grid.bead_count(), "bead", "beads"),
            plural(pattern.counts.len(), "colour", "colours"),
        ),
    );

    if args.counts {
        println!("{}", counts_json(&pattern)?);
    }

    Ok(pattern)
}

/// Bead counts as pretty JSON, keyed by hex colour.
pub fn counts_json(pattern: &Pattern) -> Result<String> {
    serde_json::to_string_pretty(&pattern.counts).map_err(|e| BeadError::Input {
        message: format!("Failed to serialize colour counts: {}", e),
        help: None,
    })
}

/// `photos/cat.jpg` -> `photos/cat.beads.png`
fn default_output(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("pattern");
    image.with_file_name(format!("{}.beads.png", stem))
}

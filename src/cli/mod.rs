pub mod build;
pub mod completions;
pub mod init;
pub mod palette;
mod watch;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// beadwork - turn images into fused-bead patterns
#[derive(Parser, Debug)]
#[command(name = "beadwork")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an image into a bead pattern PNG
    Build(build::BuildArgs),

    /// List palettes or print a palette's colours
    Palette(palette::PaletteArgs),

    /// Write a default beadwork.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load an explicit config file, or discover one in the working directory.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match explicit {
        Some(path) => Ok((Config::load(path)?, Some(path.to_path_buf()))),
        None => Config::discover(&std::env::current_dir()?),
    }
}

//! Init command implementation.
//!
//! Writes a `beadwork.yaml` holding the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{BeadError, Result};
use crate::output::{display_path, Printer};

/// Write a default beadwork.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing beadwork.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(BeadError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let mut yaml = Config::default().to_yaml()?;
    yaml.push_str("# palettes:\n#   mine:\n#     - \"#FF0000\"\n#     - \"#0000FF\"\n");

    fs::write(&config_path, &yaml).map_err(|e| BeadError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&config_path));

    Ok(())
}

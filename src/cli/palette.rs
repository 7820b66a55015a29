//! Palette listing.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::PaletteStore;

use super::load_config;

/// List palettes or print a palette's colours
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Palette to print; lists all palettes when omitted
    pub name: Option<String>,

    /// Config file with user palettes (default: ./beadwork.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let (config, _) = load_config(args.config.as_deref())?;
    let store = config.palette_store()?;

    let lines = match &args.name {
        Some(name) => {
            let colours = store.colors(name)?;
            printer.status("Palette", &format!("{} ({})", name, plural(colours.len(), "colour", "colours")));
            palette_lines(&store, name)?
        }
        None => list_lines(&store),
    };

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// One line per palette: name and size.
fn list_lines(store: &PaletteStore) -> Vec<String> {
    store
        .iter()
        .map(|p| format!("{:<12} {}", p.name, plural(p.len(), "colour", "colours")))
        .collect()
}

/// One line per colour: index and hex, in palette order.
fn palette_lines(store: &PaletteStore, name: &str) -> Result<Vec<String>> {
    Ok(store
        .colors(name)?
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>3} {}", i + 1, c))
        .collect())
}

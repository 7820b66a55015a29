use beadwork::cli::{Cli, Commands};
use beadwork::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => beadwork::cli::build::run(args, &printer)?,
        Commands::Palette(args) => beadwork::cli::palette::run(args, &printer)?,
        Commands::Init(args) => beadwork::cli::init::run(args, &printer)?,
        Commands::Completions(args) => beadwork::cli::completions::run(args)?,
    }

    Ok(())
}

//! rotabench CLI - benchmark table augmentation tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Circular { file, json } => commands::circular::run(file, json, cli.verbose),

        Commands::Localize {
            file,
            images_root,
            workers,
            json,
        } => commands::localize::run(file, images_root, workers, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rotabench: augmentation utilities for multiple-choice VQA benchmark tables
#[derive(Parser)]
#[command(name = "rotabench")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append cyclic option permutations of every question to the table
    ///
    /// Only works for multiple-choice questions with 2 to 4 options. Writes
    /// the augmented table to <FILE>_CIRC.tsv and prints its checksum.
    Circular {
        /// Path to the benchmark table (TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode inline base64 images to files and rewrite the table with paths
    ///
    /// Useful for very large tables. Writes the rewritten table to
    /// <FILE>_local.tsv.
    Localize {
        /// Path to the benchmark table (TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Root directory for decoded images (default: images/ next to FILE)
        #[arg(long)]
        images_root: Option<PathBuf>,

        /// Number of decode worker threads
        #[arg(short, long, default_value_t = rotabench::localize::DEFAULT_WORKERS)]
        workers: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

//! Circular command - create cyclic option permutations of a benchmark table.

use std::path::PathBuf;

use colored::Colorize;
use rotabench::circularize_file;

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    if !json {
        println!(
            "{} {}",
            "Circularizing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = circularize_file(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        println!();
        println!("{}", "Input:".yellow().bold());
        println!("  {:12} {}", "rows", report.input.row_count);
        println!("  {:12} {}", "columns", report.input.column_count);
        println!("  {:12} {}", "hash", report.input.hash);
        println!();
        println!("{}", "Buckets after demotion:".yellow().bold());
        println!("  {:12} {}", "2-choice", report.stats.buckets.two);
        println!("  {:12} {}", "3-choice", report.stats.buckets.three);
        println!("  {:12} {}", "4-choice", report.stats.buckets.four);
        println!("  {:12} {}", "offset", report.stats.offset);
        println!();
    }

    println!(
        "Kept {} original rows, generated {} rotation variants",
        report.stats.originals.to_string().white().bold(),
        report.stats.variants.to_string().white().bold()
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        report.output.display().to_string().white()
    );
    println!("SHA-256: {}", report.sha256);

    Ok(())
}

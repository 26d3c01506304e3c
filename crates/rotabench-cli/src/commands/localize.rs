//! Localize command - decode inline images to files.

use std::path::PathBuf;

use colored::Colorize;
use rotabench::localize_file;

pub fn run(
    file: PathBuf,
    images_root: Option<PathBuf>,
    workers: usize,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    if !json {
        println!(
            "{} {}",
            "Localizing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = localize_file(&file, images_root.as_deref(), workers)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        println!(
            "Images directory: {}",
            report.images_dir.display().to_string().white()
        );
    }

    println!(
        "Decoded {} images ({} already present)",
        report.decoded.to_string().white().bold(),
        report.skipped.to_string().white()
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        report.output.display().to_string().white()
    );

    Ok(())
}

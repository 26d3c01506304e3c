//! Decoding inline image payloads to files.
//!
//! Benchmark tables ship images as base64 inside the `image` column, which
//! makes the files huge and slow to reload. Localizing decodes every payload
//! to `<images-root>/<dataset>/<index>.jpg` once and rewrites the table with
//! an `image_path` column instead. Runs on the original table, not the
//! circularized one; generated rows resolve through their back-reference.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

use crate::error::{Result, RotabenchError};
use crate::input::Parser;
use crate::output;
use crate::schema::{ImageCell, QuestionTable};

/// Default number of decode worker threads.
pub const DEFAULT_WORKERS: usize = 32;

/// Result of localizing a file.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizeReport {
    /// Where the rewritten table was written.
    pub output: PathBuf,
    /// Directory holding the decoded images.
    pub images_dir: PathBuf,
    /// Payloads decoded to new files.
    pub decoded: usize,
    /// Rows whose image file already existed.
    pub skipped: usize,
}

/// Decode all image payloads of `input` and write `<input>_local.tsv`.
///
/// Image files land under `<images_root>/<dataset>/`, where `dataset` is the
/// input file stem; `images_root` defaults to an `images` directory next to
/// the input. Decoding fans out over `workers` threads. Already-existing
/// image files are left alone, so reruns only fill gaps.
pub fn localize_file(
    input: impl AsRef<Path>,
    images_root: Option<&Path>,
    workers: usize,
) -> Result<LocalizeReport> {
    let input = input.as_ref();
    let (table, _source) = Parser::new().parse_file(input)?;
    let questions = QuestionTable::from_table(&table)?;

    let dataset = input.file_stem().unwrap_or_default().to_string_lossy().into_owned();
    let images_dir = match images_root {
        Some(root) => root.join(&dataset),
        None => input
            .parent()
            .unwrap_or(Path::new("."))
            .join("images")
            .join(&dataset),
    };
    fs::create_dir_all(&images_dir).map_err(|e| RotabenchError::Io {
        path: images_dir.clone(),
        source: e,
    })?;

    // One target path per row; only payload rows need decoding. A
    // back-reference points at the originating row, whose file carries that
    // row's index.
    let mut jobs: Vec<(PathBuf, &str, u64)> = Vec::new();
    let mut paths = Vec::with_capacity(questions.rows.len());
    for row in &questions.rows {
        let target = match &row.image {
            ImageCell::Payload(_) => images_dir.join(format!("{}.jpg", row.index)),
            ImageCell::BackRef(origin) => images_dir.join(format!("{origin}.jpg")),
        };
        if let ImageCell::Payload(payload) = &row.image {
            jobs.push((target.clone(), payload.as_str(), row.index));
        }
        paths.push(target);
    }

    let (decoded, skipped) = decode_all(&jobs, workers.max(1))?;

    let image_col = questions
        .headers
        .iter()
        .position(|h| h == "image")
        .ok_or_else(|| RotabenchError::MissingColumn("image".to_string()))?;

    let mut headers = questions.headers.clone();
    headers[image_col] = "image_path".to_string();
    let mut records = questions.to_records();
    for (record, path) in records.iter_mut().zip(&paths) {
        record[image_col] = path.to_string_lossy().into_owned();
    }

    let output_path = input.with_file_name(format!("{dataset}_local.tsv"));
    output::write_records(&output_path, &headers, &records)?;

    Ok(LocalizeReport {
        output: output_path,
        images_dir,
        decoded,
        skipped,
    })
}

/// Fan the decode jobs out over a fixed-size pool of scoped threads.
fn decode_all(jobs: &[(PathBuf, &str, u64)], workers: usize) -> Result<(usize, usize)> {
    if jobs.is_empty() {
        return Ok((0, 0));
    }

    let chunk_size = jobs.len().div_ceil(workers);
    let results: Vec<Result<(usize, usize)>> = thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || decode_chunk(chunk)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(RotabenchError::ImageDecode {
                        index: 0,
                        message: "decode worker panicked".to_string(),
                    })
                })
            })
            .collect()
    });

    let mut decoded = 0;
    let mut skipped = 0;
    for result in results {
        let (d, s) = result?;
        decoded += d;
        skipped += s;
    }
    Ok((decoded, skipped))
}

fn decode_chunk(jobs: &[(PathBuf, &str, u64)]) -> Result<(usize, usize)> {
    let mut decoded = 0;
    let mut skipped = 0;
    for (path, payload, index) in jobs {
        if path.exists() {
            skipped += 1;
            continue;
        }
        let bytes = general_purpose::STANDARD.decode(payload.trim()).map_err(|e| {
            RotabenchError::ImageDecode {
                index: *index,
                message: e.to_string(),
            }
        })?;
        fs::write(path, bytes).map_err(|e| RotabenchError::Io {
            path: path.clone(),
            source: e,
        })?;
        decoded += 1;
    }
    Ok((decoded, skipped))
}

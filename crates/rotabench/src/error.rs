//! Error types for the rotabench library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rotabench operations.
#[derive(Debug, Error)]
pub enum RotabenchError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file is not in the expected tabular form.
    #[error("Unsupported input format: {0}")]
    InputFormat(String),

    /// Empty file or no data to transform.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A required column is absent from the input table.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A row violates the question schema. Nothing is written when this fires.
    #[error("Schema violation at data row {row}: {message}")]
    Schema { row: usize, message: String },

    /// An inline image payload could not be decoded.
    #[error("Image decode failed for row index {index}: {message}")]
    ImageDecode { index: u64, message: String },
}

/// Result type alias for rotabench operations.
pub type Result<T> = std::result::Result<T, RotabenchError>;

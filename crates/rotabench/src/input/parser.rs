//! TSV parser for benchmark tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, RotabenchError};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter. Benchmark tables are tab-separated.
    pub delimiter: u8,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular benchmark files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a `.tsv` file and return the data table and metadata.
    ///
    /// The extension is a hard precondition: option texts routinely contain
    /// commas, so only tab-separated input is accepted.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        if path.extension().and_then(|e| e.to_str()) != Some("tsv") {
            return Err(RotabenchError::InputFormat(format!(
                "expected a .tsv file, got '{}'",
                path.display()
            )));
        }

        let mut file = File::open(path).map_err(|e| RotabenchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Read entire file for hashing and parsing
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| RotabenchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() {
            return Err(RotabenchError::EmptyData("no columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad short rows, truncate long ones
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(RotabenchError::EmptyData("no data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

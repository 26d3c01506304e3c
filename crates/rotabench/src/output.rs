//! TSV output writing with a content checksum.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, RotabenchError};

/// Write header and records as a TSV file and return the SHA-256 of the
/// written bytes.
///
/// The file is serialized in memory first, so a failure leaves no partial
/// output behind.
pub fn write_records(path: &Path, headers: &[String], records: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| RotabenchError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e.to_string()),
    })?;

    fs::write(path, &bytes).map_err(|e| RotabenchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

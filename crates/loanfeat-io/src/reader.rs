//! Application table reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use loanfeat_core::ApplicationRow;

use crate::error::{IoError, IoResult};

/// Columns every input table must carry
pub const REQUIRED_COLUMNS: [&str; 3] = ["id", "application_date", "contracts"];

/// Load every application row from a CSV file
///
/// A missing file, an empty file, or a header without the required columns
/// is an error; extra columns are ignored.
pub fn load_applications(path: impl AsRef<Path>) -> IoResult<Vec<ApplicationRow>> {
    let path = path.as_ref();
    let source = path.display().to_string();

    if !path.exists() {
        return Err(IoError::FileNotFound(source));
    }

    let file = File::open(path)?;
    let rows = read_applications(BufReader::new(file), &source)?;
    tracing::info!("Successfully loaded {} rows from {}", rows.len(), source);
    Ok(rows)
}

/// Read application rows from any CSV source
///
/// `source` only labels errors and log lines.
pub fn read_applications<R: Read>(reader: R, source: &str) -> IoResult<Vec<ApplicationRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        tracing::error!("Empty file found at {}", source);
        return Err(IoError::EmptyInput(source.to_string()));
    }

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            tracing::error!("Column {} missing from {}", column, source);
            return Err(IoError::MissingColumn(column.to_string()));
        }
    }

    rdr.deserialize::<ApplicationRow>()
        .map(|row| row.map_err(IoError::from))
        .collect()
}

//! Feature table writer

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use loanfeat_core::{FeatureConfig, FeatureRow, OUTPUT_COLUMNS};

use crate::error::IoResult;

/// Save feature rows to a CSV file
///
/// Parent directories are created as needed and an existing file is
/// replaced.
pub fn save_features(
    path: impl AsRef<Path>,
    rows: &[FeatureRow],
    config: &FeatureConfig,
) -> IoResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_features(BufWriter::new(file), rows, config)?;
    tracing::info!("Successfully saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write feature rows as CSV to any sink
pub fn write_features<W: Write>(writer: W, rows: &[FeatureRow], config: &FeatureConfig) -> IoResult<()> {
    let mut wrt = csv::WriterBuilder::new().from_writer(writer);

    wrt.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        wrt.write_record(row.to_cells(config))?;
    }
    wrt.flush()?;
    Ok(())
}

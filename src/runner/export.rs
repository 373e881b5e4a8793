//! Writing batch results to disk

use std::{fs::File, io::BufWriter, path::Path};

use crate::{Error, Result, runner::RunSummary};

/// Write the full summary, including per-game records, as pretty JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_json<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
    Ok(())
}

/// Write the per-game records as CSV, one row per game.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a record fails to
/// serialize.
pub fn write_csv<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in &summary.records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| Error::Io {
        operation: "flush CSV output".to_string(),
        source,
    })?;
    Ok(())
}

use std::path::{Path, PathBuf};

use peak_core::PeakRecord;
use scrape_logging::scrape_info;

use crate::persist::{write_atomically, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Pretty-printed JSON array of records, two-space indent, non-ASCII kept as is.
pub fn render_peaks_json(records: &[PeakRecord]) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Writes the final collection to `path`, replacing any previous file.
pub fn write_peaks_json(path: &Path, records: &[PeakRecord]) -> Result<PathBuf, ExportError> {
    let json = render_peaks_json(records)?;
    let written = write_atomically(path, json.as_bytes())?;
    scrape_info!("Saved {} records to {}", records.len(), written.display());
    Ok(written)
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("output path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` (and its parents) unless it already exists as a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| PersistError::OutputDir(err.to_string()))
        }
        Err(err) => Err(PersistError::OutputDir(err.to_string())),
    }
}

/// Stages `content` next to `target` and renames it into place, so an
/// existing file is replaced in one step and never left half-written.
pub fn write_atomically(target: &Path, content: &[u8]) -> Result<PathBuf, PersistError> {
    let dir = staging_dir(target)?;
    ensure_output_dir(&dir)?;

    let mut staged = NamedTempFile::new_in(&dir)?;
    staged.write_all(content)?;
    staged.as_file().sync_all()?;
    staged
        .persist(target)
        .map_err(|err| PersistError::Io(err.error))?;
    Ok(target.to_path_buf())
}

fn staging_dir(target: &Path) -> Result<PathBuf, PersistError> {
    if target.file_name().is_none() {
        return Err(PersistError::NoFileName(target.to_path_buf()));
    }
    Ok(match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    })
}

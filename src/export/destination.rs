//! Destination path validation and file acquisition.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tracing::debug;

use super::error::ExportError;

/// Picks the single destination path out of the positional arguments.
///
/// # Errors
///
/// Returns [`ExportError::Usage`] unless exactly one path was given.
pub fn resolve_destination(paths: &[PathBuf]) -> Result<&Path, ExportError> {
    match paths {
        [path] => Ok(path.as_path()),
        _ => Err(ExportError::usage(paths.len())),
    }
}

/// Opens the destination write-only, creating it if absent and truncating
/// any previous content.
///
/// The returned handle is closed when dropped, on every exit path.
///
/// # Errors
///
/// Returns [`ExportError::Destination`] if the file cannot be opened.
pub async fn open_destination(path: &Path) -> Result<File, ExportError> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| ExportError::destination(path, e))?;
    debug!(path = %path.display(), "destination opened");
    Ok(file)
}

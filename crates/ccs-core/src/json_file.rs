//! Whole-document JSON file access
//!
//! Every ccs file is read and written as one document: there is no partial
//! update and no locking, so concurrent writers race with last-write-wins.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Read and parse a JSON document
///
/// # Errors
/// Returns `FileAccess` if the file cannot be read and `Parse` if it is not
/// valid JSON of the expected shape
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::file_access(path, &e))?;
    debug!(path = %path.display(), bytes = content.len(), "read json file");
    serde_json::from_str(&content).map_err(|e| StoreError::parse(path, e.to_string()))
}

/// Read a JSON document, returning `None` if the file does not exist
///
/// # Errors
/// Same as [`read_json`] for any failure other than a missing file
pub fn read_json_if_exists<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::parse(path, e.to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::file_access(path, &e)),
    }
}

/// Overwrite a file with pretty-printed JSON (2-space indent, trailing newline)
///
/// # Errors
/// Returns `FileAccess` if the parent directory or file cannot be written
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::file_access(parent, &e))?;
    }

    let mut content =
        serde_json::to_string_pretty(value).map_err(|e| StoreError::parse(path, e.to_string()))?;
    content.push('\n');

    fs::write(path, content).map_err(|e| StoreError::file_access(path, &e))?;
    debug!(path = %path.display(), "wrote json file");
    Ok(())
}

/// Make sure `path` exists, creating it with `initial` if it does not
///
/// An existing file is left untouched, whatever its content.
///
/// # Errors
/// Returns `FileAccess` if the directory or file cannot be created
pub fn ensure_json_file<T: Serialize + ?Sized>(path: &Path, initial: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::file_access(parent, &e))?;
    }
    if path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "initialising missing json file");
    write_json(path, initial)
}

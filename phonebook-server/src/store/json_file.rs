use crate::errors::store_error::StoreError;
use log::trace;
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads a JSON array, a missing or empty file is an empty collection
pub fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the file with the pretty-printed array.
///
/// Each call writes its own temporary file next to the target and persists it
/// over the target, so readers see either the old or the new contents.
pub fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let write_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error)?;

    let mut json = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;
    json.push('\n');

    let mut temporary = NamedTempFile::new_in(parent).map_err(write_error)?;
    temporary.write_all(json.as_bytes()).map_err(write_error)?;
    temporary
        .persist(path)
        .map_err(|error| write_error(error.error))?;

    trace!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Deletes a collection file, returns whether there was one
pub fn remove_collection(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StoreError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};

/// Read a whole file as text, returning `None` if it doesn't exist
pub fn read_text<P: AsRef<Path>>(path: P) -> TrackerResult<Option<String>> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TrackerError::PersistenceUnavailable(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> TrackerResult<()> {
    let path = path.as_ref();
    let unavailable = |what: &str, e: std::io::Error| {
        TrackerError::PersistenceUnavailable(format!("{} {}: {}", what, path.display(), e))
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| unavailable("Failed to create directory for", e))?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let file = File::create(temp_path).map_err(|e| unavailable("Failed to create temp file for", e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| unavailable("Failed to write", e))?;
    writer.flush().map_err(|e| unavailable("Failed to flush", e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| unavailable("Failed to sync", e))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        unavailable("Failed to replace", e)
    })?;

    Ok(())
}

/// Delete a file, treating a missing file as success
pub fn remove_file<P: AsRef<Path>>(path: P) -> TrackerResult<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TrackerError::PersistenceUnavailable(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

//! Key-value backends for the persisted blob
//!
//! The store only ever needs "read this key", "replace this key" and
//! "forget this key". A directory of files serves desktop use; the in-memory
//! backend serves tests and sessions where durable storage is unavailable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};

use super::file_io::{read_text, remove_file, write_atomic};

/// A durable local key-value area
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> TrackerResult<Option<String>>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()>;

    /// Forget `key`; forgetting an absent key succeeds
    fn remove(&mut self, key: &str) -> TrackerResult<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Backend rooted at the configured storage directory
    pub fn from_paths(paths: &TrackerPaths) -> Self {
        Self::new(paths.storage_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> TrackerResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');

        if !valid {
            return Err(TrackerError::Config(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        read_text(self.path_for(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        write_atomic(self.path_for(key)?, value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> TrackerResult<()> {
        remove_file(self.path_for(key)?)
    }
}

/// Volatile backend
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with one entry
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TrackerResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

//! File-backed settings store.
//!
//! Persists each record as a standalone JSON text file named `<key>.json`
//! inside a configured directory.  The record's value is written verbatim
//! (it is already a JSON-encoded settings text), so a record survives
//! companion restarts exactly as the watchface last produced it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::relay::{SettingsStore, StoreError};

/// A [`SettingsStore`] backed by one file per record key.
pub struct FileSettingsStore {
    dir: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store rooted at `dir`.  The directory is created lazily on
    /// the first write, so constructing a store never touches the disk.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.record_path(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(key, path = %path.display(), "loaded settings record");
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StoreError(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let path = self.record_path(key);
        std::fs::write(&path, value).map_err(|e| {
            StoreError(format!("failed to write {}: {e}", path.display()))
        })?;
        debug!(key, path = %path.display(), "persisted settings record");
        Ok(())
    }
}

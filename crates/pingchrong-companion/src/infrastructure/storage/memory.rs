//! In-memory settings store.
//!
//! Holds records in a mutex-guarded map.  Used by tests and useful when
//! running the companion without any persistence (records last for the
//! lifetime of the process).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::relay::{SettingsStore, StoreError};

/// A [`SettingsStore`] keeping records in process memory.
#[derive(Default)]
pub struct MemorySettingsStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a single record.
    pub fn with_record(key: &str, value: &str) -> Self {
        let store = Self::new();
        {
            let mut records = store
                .records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            records.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError("settings store lock poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError("settings store lock poisoned".to_string()))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//! In-memory storage

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use super::{SnapshotStorage, StorageError};

/// Process-local storage. Clones share the same map, like tabs sharing one origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<FxHashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.slots.read().map_or(0, |slots| slots.len())
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(|err| StorageError::Poisoned(err.to_string()))?;

        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|err| StorageError::Poisoned(err.to_string()))?;

        slots.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|err| StorageError::Poisoned(err.to_string()))?;

        slots.remove(key);

        Ok(())
    }
}

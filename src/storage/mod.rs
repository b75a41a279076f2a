//! Snapshot storage
//!
//! Key-value storage shared by every cart session of one origin. Reads and writes are
//! synchronous and whole-value: the last writer of a key wins.

use std::{fmt::Debug, io};

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a [`SnapshotStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be stored by this backend.
    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed for \"{key}\": {source}")]
    Io {
        /// Key being accessed
        key: String,

        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// Another holder of the storage lock panicked.
    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

/// Synchronous get/set/remove by string key.
pub trait SnapshotStorage: Debug + Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

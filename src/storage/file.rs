//! File-backed storage

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::{SnapshotStorage, StorageError};

const EXTENSION: &str = "json";

/// One file per key inside a directory, so separate processes can share carts.
///
/// File names are the lowercase hex of the key's UTF-8 bytes, so any key maps to a safe name
/// and distinct keys never share a file. Each write goes to its own temporary file in the same
/// directory, which is then renamed over the target, so readers never observe a half-written
/// snapshot even when several processes write one key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens (and creates, if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;

        Ok(Self { root })
    }

    /// Directory holding the snapshot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let hex: String = key.bytes().map(|byte| format!("{byte:02x}")).collect();

        Ok(self.root.join(format!("{hex}.{EXTENSION}")))
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        let mut file = NamedTempFile::new_in(&self.root).map_err(io_err)?;

        file.write_all(value.as_bytes()).map_err(io_err)?;
        file.persist(&path).map_err(|err| io_err(err.error))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

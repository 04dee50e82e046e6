//! File-backed storage

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{KeyValueStore, StorageError, validate_key};

/// Storage that keeps each key in its own file inside a data directory.
///
/// Values are written to a temporary sibling and renamed into place, so a reader
/// never sees a partially written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError::Write`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            path: dir.clone(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Directory the values are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&staging, value).map_err(|source| StorageError::Write {
            path: staging.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&staging, &path) {
            _ = fs::remove_file(&staging);

            return Err(StorageError::Write { path, source });
        }

        debug!(key, bytes = value.len(), "stored value");

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

//! Durable key-value storage.
//!
//! The history store persists each of its collections as one opaque value under a
//! fixed key. Backends only move bytes; encoding is the caller's business.

use std::{io, path::PathBuf};

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a value failed.
    #[error("failed to read {path}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Writing or removing a value failed.
    #[error("failed to write {path}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The key contains characters that cannot be stored.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Byte-oriented key-value storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Keys may only use ASCII letters, digits, `_` and `-`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

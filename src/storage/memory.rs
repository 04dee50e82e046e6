//! In-memory storage

use rustc_hash::FxHashMap;

use super::{KeyValueStore, StorageError, validate_key};

/// Storage that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;

        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;

        self.values.insert(key.to_string(), value.to_vec());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        self.values.remove(key);

        Ok(())
    }
}

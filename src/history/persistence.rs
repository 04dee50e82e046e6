//! Encoding collections to and from key-value storage.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

use crate::storage::{KeyValueStore, StorageError};

use super::HistoryError;

/// Key holding the unresolved shopping list.
pub const ACTIVE_ITEMS_KEY: &str = "active_items";

/// Key holding the purchased archive.
pub const PURCHASED_KEY: &str = "history_purchased";

/// Key holding the missing archive.
pub const MISSING_KEY: &str = "history_missing";

/// Why a stored value was discarded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value could not be read from storage.
    #[error("stored value could not be read")]
    Storage(#[from] StorageError),

    /// The value was read but is not a valid encoding.
    #[error("stored value is malformed")]
    Malformed(#[from] serde_json::Error),
}

/// Result of loading one collection.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A stored value was decoded.
    Loaded,

    /// Nothing had been stored yet; the collection starts empty.
    Absent,

    /// The stored value was unusable and was replaced by an empty collection.
    Recovered(DecodeError),
}

impl LoadOutcome {
    /// Whether stored data was decoded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Whether corrupt or unreadable data was discarded.
    #[must_use]
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }
}

/// Per-collection outcome of [`HistoryStore::load`](super::HistoryStore::load).
#[derive(Debug)]
pub struct LoadReport {
    /// Outcome for the active list
    pub active: LoadOutcome,

    /// Outcome for the purchased archive
    pub purchased: LoadOutcome,

    /// Outcome for the missing archive
    pub missing: LoadOutcome,
}

impl LoadReport {
    /// Whether any collection had to be recovered as empty.
    #[must_use]
    pub fn any_recovered(&self) -> bool {
        [&self.active, &self.purchased, &self.missing]
            .into_iter()
            .any(LoadOutcome::is_recovered)
    }
}

/// Read and decode the value under `key`, falling back to `T::default()`.
pub(crate) fn read<T, S>(storage: &S, key: &str) -> (T, LoadOutcome)
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let bytes = match storage.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return (T::default(), LoadOutcome::Absent),
        Err(error) => {
            warn!(key, %error, "failed to read stored value, starting empty");
            return (T::default(), LoadOutcome::Recovered(error.into()));
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => (value, LoadOutcome::Loaded),
        Err(error) => {
            warn!(key, %error, "discarding malformed stored value, starting empty");
            (T::default(), LoadOutcome::Recovered(error.into()))
        }
    }
}

/// Encode `value` and store it under `key`.
pub(crate) fn write<T, S>(
    storage: &mut S,
    key: &'static str,
    value: &T,
) -> Result<(), HistoryError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let bytes =
        serde_json::to_vec(value).map_err(|source| HistoryError::Encode { key, source })?;

    storage.set(key, &bytes)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn read_absent_key_reports_absent() {
        let storage = MemoryStore::new();

        let (value, outcome) = read::<Vec<u32>, _>(&storage, ACTIVE_ITEMS_KEY);

        assert!(value.is_empty());
        assert!(matches!(outcome, LoadOutcome::Absent), "got {outcome:?}");
    }

    #[test]
    fn read_malformed_value_recovers_empty() -> TestResult {
        let mut storage = MemoryStore::new();
        storage.set(ACTIVE_ITEMS_KEY, b"not json")?;

        let (value, outcome) = read::<Vec<u32>, _>(&storage, ACTIVE_ITEMS_KEY);

        assert!(value.is_empty());
        assert!(
            matches!(outcome, LoadOutcome::Recovered(DecodeError::Malformed(_))),
            "got {outcome:?}"
        );

        Ok(())
    }

    #[test]
    fn write_then_read_loads_value() -> TestResult {
        let mut storage = MemoryStore::new();

        write(&mut storage, MISSING_KEY, &vec![1_u32, 2, 3])?;

        let (value, outcome) = read::<Vec<u32>, _>(&storage, MISSING_KEY);

        assert_eq!(value, vec![1, 2, 3]);
        assert!(outcome.is_loaded());

        Ok(())
    }

    #[test]
    fn report_flags_any_recovery() {
        let report = LoadReport {
            active: LoadOutcome::Absent,
            purchased: LoadOutcome::Loaded,
            missing: LoadOutcome::Recovered(DecodeError::Storage(StorageError::InvalidKey(
                "x y".to_string(),
            ))),
        };

        assert!(report.any_recovered());
    }
}

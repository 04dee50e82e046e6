//! History store errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`HistoryStore`](super::HistoryStore) operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// An item with this name is already on today's list.
    #[error("{name:?} is already in today's list")]
    DuplicateItem {
        /// Name of the rejected item
        name: String,
    },

    /// The item name was empty or only whitespace.
    #[error("item name cannot be empty")]
    EmptyName,

    /// A collection could not be encoded for storage.
    #[error("failed to encode {key}")]
    Encode {
        /// Storage key being written
        key: &'static str,
        /// Underlying encoder error
        #[source]
        source: serde_json::Error,
    },

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

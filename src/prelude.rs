//! Grocery Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calendar::{CalendarDay, Clock, FixedClock, SystemClock},
    fixtures::{FixtureError, FixtureImport, ShoppingListFixture},
    history::{
        Archive, DecodeError, HistoryError, HistoryEvent, HistoryObserver, HistoryStore,
        LoadOutcome, LoadReport, ShoppingSummary, SubscriptionId,
    },
    items::{Amount, AmountError, GroceryItem, ItemUuid},
    report::{ReportError, write_active_list, write_history},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};

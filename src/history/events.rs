//! Change notifications.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::{
    calendar::CalendarDay,
    items::{GroceryItem, ItemUuid},
};

use super::ShoppingSummary;

/// Something that changed in the history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// An item was put on the active list.
    ItemAdded(GroceryItem),

    /// An item was deleted from the active list or the archives.
    ItemRemoved(ItemUuid),

    /// The active list was resolved into the archives.
    ShoppingFinished(ShoppingSummary),

    /// A day was removed from both archives.
    DayCleared(CalendarDay),

    /// Both archives were emptied.
    HistoryCleared,

    /// State was reloaded from storage.
    Loaded,
}

/// Receives [`HistoryEvent`]s after each change.
///
/// Any `FnMut(&HistoryEvent)` closure is an observer.
pub trait HistoryObserver {
    /// Called once per change, after the store has been updated.
    fn on_event(&mut self, event: &HistoryEvent);
}

impl<F> HistoryObserver for F
where
    F: FnMut(&HistoryEvent),
{
    fn on_event(&mut self, event: &HistoryEvent) {
        self(event);
    }
}

/// Handle returned by [`HistoryStore::subscribe`](super::HistoryStore::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn HistoryObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(
        &mut self,
        observer: impl HistoryObserver + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);

        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));

        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();

        self.entries.retain(|(entry_id, _)| *entry_id != id);

        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &HistoryEvent) {
        for (_, observer) in &mut self.entries {
            observer.on_event(event);
        }
    }
}

impl Debug for Observers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

//! Day-keyed archive of resolved items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    calendar::CalendarDay,
    items::{GroceryItem, ItemUuid},
};

/// Resolved items bucketed by the calendar day they were resolved on.
///
/// A day is only present while it holds at least one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archive {
    days: BTreeMap<CalendarDay, Vec<GroceryItem>>,
}

impl Archive {
    /// Create an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items archived on `day`, in the order they were resolved.
    pub fn on(&self, day: CalendarDay) -> &[GroceryItem] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether anything was archived on `day`.
    pub fn contains_day(&self, day: CalendarDay) -> bool {
        self.days.contains_key(&day)
    }

    /// Whether an item with this id is archived on any day.
    pub fn contains_item(&self, id: ItemUuid) -> bool {
        self.days.values().flatten().any(|item| item.id() == id)
    }

    /// Days with archived items, oldest first.
    pub fn days(&self) -> impl DoubleEndedIterator<Item = CalendarDay> + '_ {
        self.days.keys().copied()
    }

    /// Number of days with archived items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the archive holds no days at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of archived items across all days.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub(crate) fn append(
        &mut self,
        day: CalendarDay,
        items: impl IntoIterator<Item = GroceryItem>,
    ) {
        let mut items = items.into_iter().peekable();

        if items.peek().is_none() {
            return;
        }

        self.days.entry(day).or_default().extend(items);
    }

    pub(crate) fn remove_day(&mut self, day: CalendarDay) -> Option<Vec<GroceryItem>> {
        self.days.remove(&day)
    }

    /// Remove the item with this id from whichever day holds it.
    pub(crate) fn remove_item(&mut self, id: ItemUuid) -> Option<GroceryItem> {
        let mut removed = None;

        for items in self.days.values_mut() {
            if let Some(position) = items.iter().position(|item| item.id() == id) {
                removed = Some(items.remove(position));
                break;
            }
        }

        self.prune_empty_days();

        removed
    }

    pub(crate) fn clear(&mut self) {
        self.days.clear();
    }

    pub(crate) fn prune_empty_days(&mut self) {
        self.days.retain(|_, items| !items.is_empty());
    }
}

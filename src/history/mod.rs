//! History
//!
//! [`HistoryStore`] owns the active shopping list and the purchased and missing
//! archives. Every read and write goes through it, and every mutation is written
//! through to storage before the call returns.

use std::mem;

use jiff::tz::TimeZone;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::{
    calendar::{CalendarDay, Clock},
    items::{Amount, GroceryItem, ItemUuid},
    storage::KeyValueStore,
};

pub mod archive;
pub mod errors;
pub mod events;
pub mod persistence;

pub use archive::Archive;
pub use errors::HistoryError;
pub use events::{HistoryEvent, HistoryObserver, SubscriptionId};
pub use persistence::{DecodeError, LoadOutcome, LoadReport};

use events::Observers;
use persistence::{ACTIVE_ITEMS_KEY, MISSING_KEY, PURCHASED_KEY};

/// How a finished shopping trip was split between the archives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShoppingSummary {
    /// Day the items were archived under
    pub day: CalendarDay,

    /// Number of items moved to the purchased archive
    pub purchased: usize,

    /// Number of items moved to the missing archive
    pub missing: usize,
}

/// The active list plus the day-keyed purchased and missing archives.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore, C: Clock> {
    storage: S,
    clock: C,
    tz: TimeZone,
    active: Vec<GroceryItem>,
    purchased: Archive,
    missing: Archive,
    observers: Observers,
}

impl<S: KeyValueStore, C: Clock> HistoryStore<S, C> {
    /// Create an empty store with an explicit clock and time zone.
    pub fn with_clock(storage: S, clock: C, tz: TimeZone) -> Self {
        Self {
            storage,
            clock,
            tz,
            active: Vec::new(),
            purchased: Archive::new(),
            missing: Archive::new(),
            observers: Observers::default(),
        }
    }

    /// Replace the in-memory state with what is in storage.
    ///
    /// Absent or undecodable values leave the matching collection empty; the
    /// returned report says which happened for each one.
    pub fn load(&mut self) -> LoadReport {
        let (active, active_outcome) =
            persistence::read::<Vec<GroceryItem>, _>(&self.storage, ACTIVE_ITEMS_KEY);
        let (mut purchased, purchased_outcome) =
            persistence::read::<Archive, _>(&self.storage, PURCHASED_KEY);
        let (mut missing, missing_outcome) =
            persistence::read::<Archive, _>(&self.storage, MISSING_KEY);

        purchased.prune_empty_days();
        missing.prune_empty_days();

        self.active = active;
        self.purchased = purchased;
        self.missing = missing;

        info!(
            active = self.active.len(),
            purchased_days = self.purchased.len(),
            missing_days = self.missing.len(),
            "loaded grocery history"
        );

        self.observers.notify(&HistoryEvent::Loaded);

        LoadReport {
            active: active_outcome,
            purchased: purchased_outcome,
            missing: missing_outcome,
        }
    }

    /// Write both archives and then the active list to storage.
    ///
    /// The active list goes last: a failed write can leave an item both listed and
    /// archived, never in neither.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if encoding or the storage backend fails.
    pub fn persist(&mut self) -> Result<(), HistoryError> {
        persistence::write(&mut self.storage, PURCHASED_KEY, &self.purchased)?;
        persistence::write(&mut self.storage, MISSING_KEY, &self.missing)?;
        persistence::write(&mut self.storage, ACTIVE_ITEMS_KEY, &self.active)?;

        debug!("persisted grocery history");

        Ok(())
    }

    /// Put a new item on the active list.
    ///
    /// The name is trimmed before use. An item with the same name created today
    /// that is still on the active list blocks the insert.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::EmptyName`] if the trimmed name is empty.
    /// - [`HistoryError::DuplicateItem`] if the name is already on today's list.
    /// - [`HistoryError::Storage`] or [`HistoryError::Encode`] if persisting fails;
    ///   the item has been added in memory regardless.
    pub fn add_active_item(
        &mut self,
        name: &str,
        amount: Amount,
    ) -> Result<GroceryItem, HistoryError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(HistoryError::EmptyName);
        }

        let now = self.clock.now();
        let today = CalendarDay::of(now, &self.tz);

        if self
            .active
            .iter()
            .any(|item| item.matches(name, today, &self.tz))
        {
            debug!(name, %today, "rejected duplicate item");

            return Err(HistoryError::DuplicateItem {
                name: name.to_string(),
            });
        }

        let item = GroceryItem::new(name, amount, now);

        debug!(id = %item.id(), name, %amount, "added item");

        self.active.push(item.clone());
        self.commit(HistoryEvent::ItemAdded(item.clone()))?;

        Ok(item)
    }

    /// Delete an item from the active list, and any archived entry with the same id.
    ///
    /// Returns whether anything was removed. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if persisting the change fails.
    pub fn remove_active_item(&mut self, id: ItemUuid) -> Result<bool, HistoryError> {
        let before = self.active.len();

        self.active.retain(|item| item.id() != id);

        let removed_active = self.active.len() != before;
        let removed_archived = self.take_archived(id);

        if !(removed_active || removed_archived) {
            return Ok(false);
        }

        debug!(%id, removed_active, removed_archived, "removed item");

        self.commit(HistoryEvent::ItemRemoved(id))?;

        Ok(true)
    }

    /// Delete a single archived entry, whichever day and archive holds it.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if persisting the change fails.
    pub fn remove_archived_item(&mut self, id: ItemUuid) -> Result<bool, HistoryError> {
        if !self.take_archived(id) {
            return Ok(false);
        }

        debug!(%id, "removed archived item");

        self.commit(HistoryEvent::ItemRemoved(id))?;

        Ok(true)
    }

    /// Resolve every active item into today's archives.
    ///
    /// Items whose id is in `resolved` are archived as purchased, all others as
    /// missing. The active list is empty afterwards. Ids that are not on the
    /// active list are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if persisting the change fails; the items have
    /// been archived in memory regardless.
    pub fn finish_shopping(
        &mut self,
        resolved: impl IntoIterator<Item = ItemUuid>,
    ) -> Result<ShoppingSummary, HistoryError> {
        let resolved: FxHashSet<ItemUuid> = resolved.into_iter().collect();
        let day = self.today();

        let (purchased, missing): (Vec<GroceryItem>, Vec<GroceryItem>) =
            mem::take(&mut self.active)
                .into_iter()
                .partition(|item| resolved.contains(&item.id()));

        let summary = ShoppingSummary {
            day,
            purchased: purchased.len(),
            missing: missing.len(),
        };

        self.purchased.append(day, purchased);
        self.missing.append(day, missing);

        debug!(
            %day,
            purchased = summary.purchased,
            missing = summary.missing,
            "finished shopping"
        );

        self.commit(HistoryEvent::ShoppingFinished(summary))?;

        Ok(summary)
    }

    /// Remove `day` from both archives.
    ///
    /// Returns whether either archive held the day.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if persisting the change fails.
    pub fn clear_day(&mut self, day: CalendarDay) -> Result<bool, HistoryError> {
        let purchased = self.purchased.remove_day(day).is_some();
        let missing = self.missing.remove_day(day).is_some();

        if !(purchased || missing) {
            return Ok(false);
        }

        debug!(%day, purchased, missing, "cleared day");

        self.commit(HistoryEvent::DayCleared(day))?;

        Ok(true)
    }

    /// Empty both archives. The active list is untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if persisting the change fails.
    pub fn clear_all_history(&mut self) -> Result<(), HistoryError> {
        self.purchased.clear();
        self.missing.clear();

        debug!("cleared all history");

        self.commit(HistoryEvent::HistoryCleared)
    }

    /// Items not yet resolved, in the order they were added.
    pub fn active_items(&self) -> &[GroceryItem] {
        &self.active
    }

    /// Look up an active item by id.
    pub fn active_item(&self, id: ItemUuid) -> Option<&GroceryItem> {
        self.active.iter().find(|item| item.id() == id)
    }

    /// The purchased archive.
    pub fn purchased(&self) -> &Archive {
        &self.purchased
    }

    /// The missing archive.
    pub fn missing(&self) -> &Archive {
        &self.missing
    }

    /// Items bought on `day`.
    pub fn purchased_on(&self, day: CalendarDay) -> &[GroceryItem] {
        self.purchased.on(day)
    }

    /// Items that could not be bought on `day`.
    pub fn missing_on(&self, day: CalendarDay) -> &[GroceryItem] {
        self.missing.on(day)
    }

    /// Every day with purchased or missing items, newest first.
    pub fn days(&self) -> Vec<CalendarDay> {
        let mut days: Vec<CalendarDay> = self
            .purchased
            .days()
            .chain(self.missing.days())
            .collect();

        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();

        days
    }

    /// The current calendar day according to the store's clock and time zone.
    pub fn today(&self) -> CalendarDay {
        CalendarDay::of(self.clock.now(), &self.tz)
    }

    /// Register an observer for change notifications.
    pub fn subscribe(&mut self, observer: impl HistoryObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    /// Stop notifying an observer. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The clock used to stamp new items and pick today's archive day.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The time zone calendar days are computed in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    fn take_archived(&mut self, id: ItemUuid) -> bool {
        let purchased = self.purchased.remove_item(id).is_some();
        let missing = self.missing.remove_item(id).is_some();

        purchased || missing
    }

    fn commit(&mut self, event: HistoryEvent) -> Result<(), HistoryError> {
        let persisted = self.persist();

        self.observers.notify(&event);

        persisted
    }
}

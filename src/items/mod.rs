//! Items

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, tz::TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::calendar::CalendarDay;

/// Raised when an amount falls outside `Amount::MIN..=Amount::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount {0} is outside the range 1..=100")]
pub struct AmountError(pub u16);

/// Identifier of a grocery item, generated once when the item is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemUuid(Uuid);

impl ItemUuid {
    /// Generate a fresh, time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ItemUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ItemUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How many units of an item to buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Amount(u8);

impl Amount {
    /// Smallest amount that can be put on the list.
    pub const MIN: u8 = 1;

    /// Largest amount that can be put on the list.
    pub const MAX: u8 = 100;

    /// Create an amount, validating the range.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] if `value` is outside `1..=100`.
    pub fn new(value: u16) -> Result<Self, AmountError> {
        u8::try_from(value)
            .ok()
            .filter(|value| (Self::MIN..=Self::MAX).contains(value))
            .map(Self)
            .ok_or(AmountError(value))
    }

    /// Returns the amount as a plain integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl TryFrom<u16> for Amount {
    type Error = AmountError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for u16 {
    fn from(value: Amount) -> Self {
        u16::from(value.0)
    }
}

/// A single entry on the shopping list.
///
/// Identity is the [`ItemUuid`]. Two items count as duplicates when they share a
/// name and were created on the same calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    id: ItemUuid,
    name: String,
    amount: Amount,
    date: Timestamp,
}

impl GroceryItem {
    /// Creates a new item with a freshly generated id.
    pub(crate) fn new(name: impl Into<String>, amount: Amount, date: Timestamp) -> Self {
        Self {
            id: ItemUuid::new(),
            name: name.into(),
            amount,
            date,
        }
    }

    /// Returns the id of the item
    pub fn id(&self) -> ItemUuid {
        self.id
    }

    /// Returns the name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how many units to buy
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns when the item was put on the list
    pub fn date(&self) -> Timestamp {
        self.date
    }

    /// Returns the calendar day the item was created on, in the given time zone.
    pub fn day(&self, tz: &TimeZone) -> CalendarDay {
        CalendarDay::of(self.date, tz)
    }

    /// Whether this item has the given name and was created on `day`.
    pub fn matches(&self, name: &str, day: CalendarDay, tz: &TimeZone) -> bool {
        self.name == name && self.day(tz) == day
    }
}

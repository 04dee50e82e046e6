//! Calendar days and clocks.
//!
//! Archive buckets are keyed by [`CalendarDay`]. Every place that turns a point in
//! time into an archive key goes through [`CalendarDay::of`], so the keying rule
//! lives in exactly one function.

use std::{
    cell::Cell,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{SignedDuration, Timestamp, civil::Date, tz::TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

/// A date with the time of day stripped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(Date);

impl CalendarDay {
    /// Truncate a timestamp to its calendar day in the given time zone.
    #[must_use]
    pub fn of(timestamp: Timestamp, tz: &TimeZone) -> Self {
        Self(timestamp.to_zoned(tz.clone()).date())
    }

    /// Wrap a civil date.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Returns the civil date.
    #[must_use]
    pub const fn date(self) -> Date {
        self.0
    }
}

impl From<Date> for CalendarDay {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for CalendarDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for CalendarDay {
    type Err = jiff::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Date>().map(Self)
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(D::Error::custom)
    }
}

/// Source of the current time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<Timestamp>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock forward by `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result falls outside the supported timestamp range;
    /// the clock is left unchanged.
    pub fn advance(&self, duration: SignedDuration) -> Result<(), jiff::Error> {
        let next = self.now.get().checked_add(duration)?;

        self.now.set(next);

        Ok(())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

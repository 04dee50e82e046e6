//! Grocery Cart
//!
//! Grocery Cart keeps a shopping list and a day-by-day history of what was bought
//! and what the shop was out of, persisted to a simple key-value store.

pub mod calendar;
pub mod fixtures;
pub mod history;
pub mod items;
pub mod prelude;
pub mod report;
pub mod storage;

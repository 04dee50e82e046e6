//! End-to-end shopping sessions against an in-memory store.
//!
//! Each test drives the public [`HistoryStore`] API through a short session and
//! checks the active list and both archives afterwards.

use std::{cell::RefCell, rc::Rc};

use grocery_cart::prelude::*;
use jiff::{SignedDuration, tz::TimeZone};
use testresult::TestResult;

fn store_at(now: &str) -> TestResult<HistoryStore<MemoryStore, FixedClock>> {
    Ok(HistoryStore::with_clock(
        MemoryStore::new(),
        FixedClock::new(now.parse()?),
        TimeZone::UTC,
    ))
}

fn names(items: &[GroceryItem]) -> Vec<&str> {
    items.iter().map(GroceryItem::name).collect()
}

#[test]
fn duplicate_milk_is_rejected_then_archived_as_missing() -> TestResult {
    let mut store = store_at("2024-08-23T09:00:00Z")?;
    let today = store.today();

    let milk = store.add_active_item("Milk", Amount::new(2)?)?;

    assert_eq!(names(store.active_items()), ["Milk"]);
    assert_eq!(store.active_items()[0].amount(), Amount::new(2)?);

    let duplicate = store.add_active_item("Milk", Amount::default());

    assert!(
        matches!(duplicate, Err(HistoryError::DuplicateItem { ref name }) if name == "Milk"),
        "expected duplicate error, got {duplicate:?}"
    );
    assert_eq!(store.active_items().len(), 1);

    let summary = store.finish_shopping([])?;

    assert_eq!(summary.purchased, 0);
    assert_eq!(summary.missing, 1);
    assert!(store.active_items().is_empty());
    assert_eq!(store.missing_on(today), [milk]);
    assert!(store.purchased_on(today).is_empty());
    assert!(!store.purchased().contains_day(today));

    Ok(())
}

#[test]
fn finish_splits_by_resolved_ids() -> TestResult {
    let mut store = store_at("2024-08-23T09:00:00Z")?;
    let today = store.today();

    let eggs = store.add_active_item("Eggs", Amount::default())?;
    store.add_active_item("Bread", Amount::default())?;

    store.finish_shopping([eggs.id()])?;

    assert_eq!(names(store.purchased_on(today)), ["Eggs"]);
    assert_eq!(names(store.missing_on(today)), ["Bread"]);
    assert!(store.active_items().is_empty());

    Ok(())
}

#[test]
fn clear_all_history_leaves_active_list_alone() -> TestResult {
    let mut store = store_at("2024-08-23T09:00:00Z")?;

    let eggs = store.add_active_item("Eggs", Amount::default())?;
    store.add_active_item("Bread", Amount::default())?;
    store.finish_shopping([eggs.id()])?;

    store.add_active_item("Butter", Amount::default())?;
    store.clear_all_history()?;

    assert!(store.purchased().is_empty());
    assert!(store.missing().is_empty());
    assert!(store.days().is_empty());
    assert_eq!(names(store.active_items()), ["Butter"]);

    Ok(())
}

#[test]
fn finish_preserves_item_count() -> TestResult {
    let mut store = store_at("2024-08-23T09:00:00Z")?;
    let today = store.today();

    let mut bought = Vec::new();

    for (index, name) in ["Apples", "Pears", "Plums", "Figs", "Dates"].iter().enumerate() {
        let item = store.add_active_item(name, Amount::default())?;

        if index % 2 == 0 {
            bought.push(item.id());
        }
    }

    let before = store.active_items().len();
    let summary = store.finish_shopping(bought.iter().copied())?;

    assert_eq!(summary.purchased + summary.missing, before);
    assert_eq!(store.purchased_on(today).len(), bought.len());
    assert_eq!(store.missing_on(today).len(), before - bought.len());
    assert!(
        store
            .purchased_on(today)
            .iter()
            .all(|item| bought.contains(&item.id()))
    );

    Ok(())
}

#[test]
fn same_name_is_allowed_again_the_next_day() -> TestResult {
    let mut store = store_at("2024-08-23T21:00:00Z")?;

    store.add_active_item("Coffee", Amount::default())?;
    store.clock().advance(SignedDuration::from_hours(6))?;

    let again = store.add_active_item("Coffee", Amount::default())?;

    assert_eq!(store.active_items().len(), 2);
    assert_ne!(store.active_items()[0].id(), again.id());

    Ok(())
}

#[test]
fn sessions_on_different_days_are_listed_newest_first() -> TestResult {
    let mut store = store_at("2024-08-21T09:00:00Z")?;

    store.add_active_item("Rice", Amount::default())?;
    store.finish_shopping([])?;
    let first = store.today();

    store.clock().advance(SignedDuration::from_hours(48))?;
    let tea = store.add_active_item("Tea", Amount::default())?;
    store.finish_shopping([tea.id()])?;
    let second = store.today();

    assert_eq!(store.days(), [second, first]);

    store.clear_day(first)?;

    assert_eq!(store.days(), [second]);
    assert!(!store.clear_day(first)?);

    Ok(())
}

#[test]
fn observers_follow_a_session() -> TestResult {
    let mut store = store_at("2024-08-23T09:00:00Z")?;
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    store.subscribe(move |event: &HistoryEvent| {
        sink.borrow_mut().push(std::mem::discriminant(event));
    });

    let eggs = store.add_active_item("Eggs", Amount::default())?;
    assert!(
        store.add_active_item("Eggs", Amount::default()).is_err(),
        "duplicate should be rejected"
    );
    store.finish_shopping([eggs.id()])?;
    store.clear_all_history()?;

    let seen = seen.borrow();

    assert_eq!(seen.len(), 3);
    assert_eq!(
        seen[0],
        std::mem::discriminant(&HistoryEvent::ItemAdded(eggs))
    );
    assert_eq!(
        seen[2],
        std::mem::discriminant(&HistoryEvent::HistoryCleared)
    );

    Ok(())
}

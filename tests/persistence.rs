//! Restart round-trips through the file-backed store.

use std::fs;

use grocery_cart::prelude::*;
use jiff::tz::TimeZone;
use tempfile::tempdir;
use testresult::TestResult;

fn open(
    storage: FileStore,
    now: &str,
) -> TestResult<(HistoryStore<FileStore, FixedClock>, LoadReport)> {
    let mut store =
        HistoryStore::with_clock(storage, FixedClock::new(now.parse()?), TimeZone::UTC);
    let report = store.load();

    Ok((store, report))
}

#[test]
fn first_start_reports_absent_data() -> TestResult {
    let dir = tempdir()?;
    let (store, report) = open(FileStore::open(dir.path())?, "2024-08-23T09:00:00Z")?;

    assert!(matches!(report.active, LoadOutcome::Absent));
    assert!(matches!(report.purchased, LoadOutcome::Absent));
    assert!(matches!(report.missing, LoadOutcome::Absent));
    assert!(store.active_items().is_empty());
    assert!(store.days().is_empty());

    Ok(())
}

#[test]
fn state_survives_a_restart() -> TestResult {
    let dir = tempdir()?;

    let (mut store, _) = open(FileStore::open(dir.path())?, "2024-08-23T09:00:00Z")?;

    let eggs = store.add_active_item("Eggs", Amount::new(12)?)?;
    store.add_active_item("Bread", Amount::default())?;
    store.finish_shopping([eggs.id()])?;
    store.add_active_item("Jam", Amount::new(2)?)?;

    let purchased = store.purchased().clone();
    let missing = store.missing().clone();
    let active = store.active_items().to_vec();
    drop(store);

    let (restarted, report) = open(FileStore::open(dir.path())?, "2024-08-24T09:00:00Z")?;

    assert!(report.active.is_loaded());
    assert!(report.purchased.is_loaded());
    assert!(report.missing.is_loaded());
    assert_eq!(restarted.purchased(), &purchased);
    assert_eq!(restarted.missing(), &missing);
    assert_eq!(restarted.active_items(), active);

    Ok(())
}

#[test]
fn corrupt_archive_is_recovered_as_empty() -> TestResult {
    let dir = tempdir()?;

    {
        let (mut store, _) = open(FileStore::open(dir.path())?, "2024-08-23T09:00:00Z")?;

        store.add_active_item("Oats", Amount::default())?;
        store.finish_shopping([])?;
        store.add_active_item("Honey", Amount::default())?;
    }

    fs::write(dir.path().join("history_missing.json"), b"{\"not a day\": 3}")?;

    let (store, report) = open(FileStore::open(dir.path())?, "2024-08-23T10:00:00Z")?;

    assert!(report.missing.is_recovered());
    assert!(report.any_recovered());
    assert!(report.active.is_loaded());
    assert!(store.missing().is_empty());
    assert_eq!(store.active_items().len(), 1);

    Ok(())
}

#[test]
fn cleared_history_stays_cleared() -> TestResult {
    let dir = tempdir()?;

    {
        let (mut store, _) = open(FileStore::open(dir.path())?, "2024-08-23T09:00:00Z")?;

        store.add_active_item("Salt", Amount::default())?;
        store.finish_shopping([])?;
        store.clear_all_history()?;
    }

    let (store, report) = open(FileStore::open(dir.path())?, "2024-08-23T10:00:00Z")?;

    assert!(report.missing.is_loaded());
    assert!(store.missing().is_empty());
    assert!(store.purchased().is_empty());

    Ok(())
}

#[test]
fn imported_fixture_is_persisted() -> TestResult {
    let dir = tempdir()?;
    let fixture = ShoppingListFixture::from_yaml_str(
        "items:\n  - name: Tomatoes\n    amount: 4\n  - name: Basil\n",
    )?;

    {
        let (mut store, _) = open(FileStore::open(dir.path())?, "2024-08-23T09:00:00Z")?;
        let import = fixture.apply(&mut store)?;

        assert_eq!(import.added.len(), 2);
    }

    let (store, _) = open(FileStore::open(dir.path())?, "2024-08-23T10:00:00Z")?;
    let names: Vec<&str> = store.active_items().iter().map(GroceryItem::name).collect();

    assert_eq!(names, ["Tomatoes", "Basil"]);

    Ok(())
}

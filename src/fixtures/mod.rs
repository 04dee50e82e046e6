//! Fixtures
//!
//! Shopping lists written as YAML, used to seed the active list in one go.
//!
//! ```yaml
//! items:
//!   - name: Milk
//!     amount: 2
//!   - name: Eggs
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    calendar::Clock,
    history::{HistoryError, HistoryStore},
    items::{Amount, AmountError, GroceryItem},
    storage::KeyValueStore,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// An entry has no name
    #[error("Item {0} has an empty name")]
    EmptyName(usize),

    /// An entry has an amount outside the allowed range
    #[error("Invalid amount for {name}: {source}")]
    InvalidAmount {
        /// Name of the offending entry
        name: String,
        /// Range error
        #[source]
        source: AmountError,
    },

    /// The store rejected an entry for a reason other than a duplicate
    #[error("Failed to add item: {0}")]
    History(#[from] HistoryError),
}

#[derive(Debug, Deserialize)]
struct RawList {
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,

    #[serde(default = "default_amount")]
    amount: u16,
}

fn default_amount() -> u16 {
    u16::from(Amount::MIN)
}

/// A validated shopping list read from YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListFixture {
    entries: Vec<(String, Amount)>,
}

/// What happened when a fixture was applied to a store.
#[derive(Debug, Default)]
pub struct FixtureImport {
    /// Items that were put on the active list
    pub added: Vec<GroceryItem>,

    /// Names that were already on today's list
    pub skipped: Vec<String>,
}

impl ShoppingListFixture {
    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an entry is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a name is blank, or an amount is
    /// outside `1..=100`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        let raw: RawList = serde_norway::from_str(yaml)?;

        let entries = raw
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let name = item.name.trim().to_string();

                if name.is_empty() {
                    return Err(FixtureError::EmptyName(index));
                }

                match Amount::new(item.amount) {
                    Ok(amount) => Ok((name, amount)),
                    Err(source) => Err(FixtureError::InvalidAmount { name, source }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[(String, Amount)] {
        &self.entries
    }

    /// Add every entry to the store's active list, skipping names already on
    /// today's list.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::History`] if the store fails for any reason other
    /// than a duplicate. Entries before the failing one stay on the list.
    pub fn apply<S, C>(
        &self,
        store: &mut HistoryStore<S, C>,
    ) -> Result<FixtureImport, FixtureError>
    where
        S: KeyValueStore,
        C: Clock,
    {
        let mut import = FixtureImport::default();

        for (name, amount) in &self.entries {
            match store.add_active_item(name, *amount) {
                Ok(item) => import.added.push(item),
                Err(HistoryError::DuplicateItem { name }) => {
                    debug!(name = %name, "fixture entry already on today's list");
                    import.skipped.push(name);
                }
                Err(error) => return Err(error.into()),
            }
        }

        Ok(import)
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;
    use testresult::TestResult;

    use crate::{calendar::FixedClock, storage::MemoryStore};

    use super::*;

    fn store() -> TestResult<HistoryStore<MemoryStore, FixedClock>> {
        Ok(HistoryStore::with_clock(
            MemoryStore::new(),
            FixedClock::new("2024-08-23T09:30:00Z".parse()?),
            TimeZone::UTC,
        ))
    }

    #[test]
    fn parses_items_with_default_amount() -> TestResult {
        let fixture = ShoppingListFixture::from_yaml_str(
            "items:\n  - name: Milk\n    amount: 2\n  - name: Eggs\n",
        )?;

        let entries: Vec<(&str, u8)> = fixture
            .entries()
            .iter()
            .map(|(name, amount)| (name.as_str(), amount.get()))
            .collect();

        assert_eq!(entries, vec![("Milk", 2), ("Eggs", 1)]);

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_amount() {
        let result =
            ShoppingListFixture::from_yaml_str("items:\n  - name: Rice\n    amount: 0\n");

        assert!(
            matches!(&result, Err(FixtureError::InvalidAmount { name, .. }) if name == "Rice"),
            "expected InvalidAmount, got {result:?}"
        );
    }

    #[test]
    fn rejects_blank_name() {
        let result =
            ShoppingListFixture::from_yaml_str("items:\n  - name: Tea\n  - name: ' '\n");

        assert!(
            matches!(result, Err(FixtureError::EmptyName(1))),
            "expected EmptyName(1), got {result:?}"
        );
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = ShoppingListFixture::from_yaml_str("items: [");

        assert!(
            matches!(result, Err(FixtureError::Yaml(_))),
            "expected Yaml error, got {result:?}"
        );
    }

    #[test]
    fn apply_skips_names_already_listed() -> TestResult {
        let mut store = store()?;
        store.add_active_item("Milk", Amount::default())?;

        let fixture = ShoppingListFixture::from_yaml_str(
            "items:\n  - name: Milk\n  - name: Bread\n  - name: Bread\n",
        )?;
        let import = fixture.apply(&mut store)?;

        assert_eq!(import.added.len(), 1);
        assert_eq!(import.skipped, vec!["Milk".to_string(), "Bread".to_string()]);
        assert_eq!(store.active_items().len(), 2);

        Ok(())
    }

    #[test]
    fn loads_bundled_weekly_list() -> TestResult {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/lists/weekly.yml");

        let fixture = ShoppingListFixture::load(path)?;

        assert!(!fixture.entries().is_empty());

        Ok(())
    }
}

//! Report
//!
//! Plain-text tables for the shopping list and the per-day history.

use std::io;

use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    calendar::{CalendarDay, Clock},
    history::HistoryStore,
    items::GroceryItem,
    storage::KeyValueStore,
};

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output could not be written.
    #[error("failed to write report")]
    Io(#[from] io::Error),
}

/// Write the active shopping list as a table.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_active_list(
    mut out: impl io::Write,
    items: &[GroceryItem],
) -> Result<(), ReportError> {
    if items.is_empty() {
        writeln!(out, "Your list is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Amount", "Id"]);

    for (position, item) in items.iter().enumerate() {
        builder.push_record([
            (position + 1).to_string(),
            item.name().to_string(),
            item.amount().to_string(),
            item.id().to_string(),
        ]);
    }

    writeln!(out, "{}", style(builder.build(), 2))?;

    Ok(())
}

/// Write every archived day, newest first, split into purchased and missing items.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_history<S, C>(
    mut out: impl io::Write,
    store: &HistoryStore<S, C>,
) -> Result<(), ReportError>
where
    S: KeyValueStore,
    C: Clock,
{
    let days = store.days();

    if days.is_empty() {
        writeln!(out, "No shopping history yet.")?;

        return Ok(());
    }

    for day in days {
        writeln!(out, "{}", day_heading(day))?;

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "#"]);

        push_section(&mut builder, "Purchased", store.purchased_on(day));
        push_section(&mut builder, "Missing", store.missing_on(day));

        writeln!(out, "{}\n", style(builder.build(), 2))?;
    }

    Ok(())
}

fn push_section(builder: &mut Builder, label: &str, items: &[GroceryItem]) {
    for (position, item) in items.iter().enumerate() {
        let label = if position == 0 { label } else { "" };

        builder.push_record([
            label.to_string(),
            item.name().to_string(),
            item.amount().to_string(),
        ]);
    }
}

fn day_heading(day: CalendarDay) -> String {
    day.date().strftime("%a, %b %-d, %Y").to_string()
}

fn style(mut table: Table, amount_column: usize) -> Table {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(amount_column..=amount_column), Alignment::right());

    table
}

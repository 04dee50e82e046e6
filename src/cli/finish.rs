use clap::Args;
use grocery_cart::items::{GroceryItem, ItemUuid};

use super::Store;

#[derive(Debug, Args)]
pub(crate) struct FinishArgs {
    /// Id or name of an item that was bought; everything else is archived as missing
    #[arg(short, long = "bought", value_name = "ID_OR_NAME")]
    bought: Vec<String>,
}

pub(crate) fn run(store: &mut Store, args: FinishArgs) -> Result<(), String> {
    let resolved = args
        .bought
        .iter()
        .map(|needle| resolve(store.active_items(), needle))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = store
        .finish_shopping(resolved)
        .map_err(|error| format!("failed to finish shopping: {error}"))?;

    println!(
        "{}: {} purchased, {} missing",
        summary.day, summary.purchased, summary.missing
    );

    Ok(())
}

fn resolve(items: &[GroceryItem], needle: &str) -> Result<ItemUuid, String> {
    if let Ok(id) = needle.parse::<ItemUuid>() {
        return Ok(id);
    }

    let needle = needle.trim();

    let mut matches = items.iter().filter(|item| item.name() == needle);

    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item.id()),
        (Some(_), Some(_)) => Err(format!(
            "several items named {needle} are on the list; pass an id instead"
        )),
        (None, _) => Err(format!("no item named {needle} on the list")),
    }
}

use clap::Args;
use grocery_cart::items::ItemUuid;

use super::Store;

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Id of the item, as shown by `list`
    id: ItemUuid,
}

pub(crate) fn run(store: &mut Store, args: RemoveArgs) -> Result<(), String> {
    let label = store
        .active_item(args.id)
        .map_or_else(|| args.id.to_string(), |item| item.name().to_string());

    let removed = store
        .remove_active_item(args.id)
        .map_err(|error| format!("failed to remove item: {error}"))?;

    if removed {
        println!("removed {label}");

        Ok(())
    } else {
        Err(format!("no item with id {}", args.id))
    }
}

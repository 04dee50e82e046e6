use clap::Args;
use grocery_cart::{history::HistoryError, items::Amount};

use super::Store;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Item name
    name: String,

    /// How many to buy (1-100)
    #[arg(short, long, default_value_t = 1)]
    amount: u16,
}

pub(crate) fn run(store: &mut Store, args: AddArgs) -> Result<(), String> {
    let amount = Amount::new(args.amount).map_err(|error| error.to_string())?;

    match store.add_active_item(&args.name, amount) {
        Ok(item) => {
            println!("added {} x{} ({})", item.name(), item.amount(), item.id());

            Ok(())
        }
        Err(HistoryError::DuplicateItem { .. }) => {
            Err("This item is already in today's list.".to_string())
        }
        Err(error) => Err(format!("failed to add item: {error}")),
    }
}

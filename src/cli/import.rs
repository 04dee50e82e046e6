use std::path::PathBuf;

use clap::Args;
use grocery_cart::fixtures::ShoppingListFixture;

use super::Store;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// YAML file with an `items` list
    path: PathBuf,
}

pub(crate) fn run(store: &mut Store, args: ImportArgs) -> Result<(), String> {
    let fixture = ShoppingListFixture::load(&args.path)
        .map_err(|error| format!("failed to read {}: {error}", args.path.display()))?;

    let import = fixture
        .apply(store)
        .map_err(|error| format!("failed to import list: {error}"))?;

    println!("added {} items", import.added.len());

    for name in &import.skipped {
        println!("skipped {name}: already on today's list");
    }

    Ok(())
}

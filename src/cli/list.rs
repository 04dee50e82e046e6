use std::io;

use grocery_cart::report;

use super::Store;

pub(crate) fn run(store: &Store) -> Result<(), String> {
    report::write_active_list(io::stdout().lock(), store.active_items())
        .map_err(|error| error.to_string())
}

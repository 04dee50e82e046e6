use std::io;

use grocery_cart::report;

use super::Store;

pub(crate) fn run(store: &Store) -> Result<(), String> {
    report::write_history(io::stdout().lock(), store).map_err(|error| error.to_string())
}

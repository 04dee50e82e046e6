#![expect(clippy::print_stdout, reason = "command results are printed for the user")]

use clap::{Parser, Subcommand};
use grocery_cart::{
    calendar::SystemClock,
    history::HistoryStore,
    storage::FileStore,
};
use tracing::warn;

use crate::config::{LoggingConfig, StoreConfig};

mod add;
mod clear;
mod finish;
mod history;
mod import;
mod list;
mod remove;

type Store = HistoryStore<FileStore, SystemClock>;

#[derive(Debug, Parser)]
#[command(name = "grocery-cart", about = "Grocery list and shopping history", long_about = None)]
pub(crate) struct Cli {
    /// Storage settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Put an item on today's list
    Add(add::AddArgs),

    /// Show the active list
    List,

    /// Delete an item by id
    Remove(remove::RemoveArgs),

    /// Archive the active list as purchased or missing
    Finish(finish::FinishArgs),

    /// Show past shopping trips, newest first
    History,

    /// Delete one day from the history
    ClearDay(clear::ClearDayArgs),

    /// Delete the whole history
    ClearHistory(clear::ClearHistoryArgs),

    /// Add every item from a YAML shopping list
    Import(import::ImportArgs),
}

impl Cli {
    /// Load configuration from `.env`, the environment and the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn run(self) -> Result<(), String> {
        let mut store = open_store(&self.store)?;

        match self.command {
            Commands::Add(args) => add::run(&mut store, args),
            Commands::List => list::run(&store),
            Commands::Remove(args) => remove::run(&mut store, args),
            Commands::Finish(args) => finish::run(&mut store, args),
            Commands::History => history::run(&store),
            Commands::ClearDay(args) => clear::run_day(&mut store, args),
            Commands::ClearHistory(args) => clear::run_history(&mut store, args),
            Commands::Import(args) => import::run(&mut store, args),
        }
    }
}

fn open_store(config: &StoreConfig) -> Result<Store, String> {
    let storage = FileStore::open(&config.data_dir)
        .map_err(|error| format!("failed to open data directory: {error}"))?;

    let mut store = HistoryStore::with_clock(storage, SystemClock, config.time_zone());
    let report = store.load();

    if report.any_recovered() {
        warn!(?report, "some saved data could not be read and was reset");
    }

    Ok(store)
}

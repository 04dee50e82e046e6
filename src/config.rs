//! Command line configuration

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use jiff::tz::TimeZone;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub(crate) log_format: LogFormat,
}

/// Where the list lives and how days are counted.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory holding the saved list and history
    #[arg(
        long,
        global = true,
        env = "GROCERY_CART_DATA_DIR",
        default_value = "./.grocery-cart"
    )]
    pub(crate) data_dir: PathBuf,

    /// Key history days in UTC instead of the system time zone
    #[arg(long, global = true)]
    pub(crate) utc: bool,
}

impl StoreConfig {
    /// Time zone used to turn timestamps into history days.
    pub(crate) fn time_zone(&self) -> TimeZone {
        if self.utc {
            TimeZone::UTC
        } else {
            TimeZone::system()
        }
    }
}

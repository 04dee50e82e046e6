use clap::Args;
use grocery_cart::calendar::CalendarDay;

use super::Store;

#[derive(Debug, Args)]
pub(crate) struct ClearDayArgs {
    /// Day to delete, as YYYY-MM-DD
    day: CalendarDay,
}

#[derive(Debug, Args)]
pub(crate) struct ClearHistoryArgs {
    /// Confirm that every archived day should be deleted
    #[arg(long)]
    yes: bool,
}

pub(crate) fn run_day(store: &mut Store, args: ClearDayArgs) -> Result<(), String> {
    let cleared = store
        .clear_day(args.day)
        .map_err(|error| format!("failed to clear day: {error}"))?;

    if cleared {
        println!("cleared {}", args.day);
    } else {
        println!("nothing recorded on {}", args.day);
    }

    Ok(())
}

pub(crate) fn run_history(store: &mut Store, args: ClearHistoryArgs) -> Result<(), String> {
    if !args.yes {
        return Err("refusing to clear history without --yes".to_string());
    }

    store
        .clear_all_history()
        .map_err(|error| format!("failed to clear history: {error}"))?;

    println!("history cleared");

    Ok(())
}

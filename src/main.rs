//! Grocery Cart CLI

use std::process::ExitCode;

use cli::Cli;

mod cli;
mod config;
mod observability;

fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        fail(&error.to_string());

        return ExitCode::FAILURE;
    }

    if let Err(error) = cli.run() {
        fail(&error);

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(clippy::print_stderr, reason = "errors are reported to the user on stderr")]
fn fail(message: &str) {
    eprintln!("{message}");
}

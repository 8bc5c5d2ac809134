//! Command dispatch: bridges CLI args -> `Flipr` calls -> output formatting.

pub mod config_cmd;
pub mod login;
pub mod measure;

use flipr_core::Flipr;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch an account-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, flipr: &Flipr, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Measure(args) => measure::handle(flipr, args, settings).await,
        Command::Login => login::handle(flipr, settings).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

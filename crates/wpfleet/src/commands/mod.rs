//! Command dispatch: bridges CLI args -> console calls -> output formatting.

pub mod config_cmd;
pub mod plugins;
pub mod sites;
pub mod update;
pub mod util;

use wpfleet_core::FleetConsole;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a console-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &FleetConsole,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Plugins => plugins::handle(console, global).await,
        Command::Sites(args) => sites::handle(console, args, global).await,
        Command::Update(args) => update::handle(console, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

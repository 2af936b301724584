//! Command executor for dispatching CLI commands

use super::handlers::{CheckCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;

/// Run the command `cli` names with already merged settings
///
/// No subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Check) => CheckCommandHandler::new(settings).execute(),
        Some(Commands::Serve { .. }) | None => ServeCommandHandler::new(settings).execute().await,
    }
}

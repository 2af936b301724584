//! CLI module for backend-utils
//!
//! - Argument parsing with clap
//! - Merging CLI overrides over file and environment configuration
//! - Command handlers for `serve` and `check`

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;

/// Load configuration, apply CLI overrides and validate
///
/// # Errors
/// Returns error if loading, merging or validation fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli).context("Configuration error")?;
    merger
        .merge_cli_args(cli)
        .context("Configuration merge error")
}

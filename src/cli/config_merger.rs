//! Configuration merger for CLI arguments and config files
//!
//! Command-line values sit on top of every file and environment source.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies CLI overrides to file-based settings
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base settings the way `cli` asks for
    ///
    /// `--config` swaps the layered directory for a single file and
    /// `--mode` picks which `{mode}.toml` layer is read.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(mode) = cli.mode {
            loader = loader.with_mode(mode);
        }

        tracing::debug!(mode = %loader.mode(), "Loading configuration");
        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments over the base settings and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(command) = &cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if let Some(mode) = cli.mode {
            config.mode = mode;
        }

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }
                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }
                // Command-specific level wins over --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Check => {}
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

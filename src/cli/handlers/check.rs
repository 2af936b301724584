//! Check command handler
//!
//! Validates the merged settings and prints where log lines would go,
//! without creating anything on disk.

use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::logger::stamp::now_local;
use crate::logger::{FileConfig, LoggerError};

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Mode: {}", self.config.mode);
        println!("✓ Server would bind to: {}", self.config.server.address());

        match log_file_preview(&self.config.logger.file)? {
            Some(path) => println!("✓ Log lines go to: {}", path.display()),
            None => println!("✓ File logging is disabled"),
        }

        Ok(())
    }
}

/// Path the sink would open for the current hour, if file output is enabled
pub fn log_file_preview(config: &FileConfig) -> Result<Option<PathBuf>, LoggerError> {
    if !config.enabled {
        return Ok(None);
    }

    let resolver = config.resolver();
    let executable_dir = resolver.resolve_executable_directory()?;
    resolver
        .build_log_file_path(now_local(), &executable_dir)
        .map(Some)
}

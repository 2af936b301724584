//! Configuration types for the logger

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::logger::error::LoggerError;
use crate::logger::line::LineFormat;
use crate::logger::resolver::{DEFAULT_SUFFIX, LOG_DIR_NAME, LogFileResolver};
use crate::logger::writer::RecoveryStrategy;

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// What to do when the hourly sink cannot be set up at startup
    pub on_setup_failure: SetupFailurePolicy,
}

impl LoggerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }

    /// Parse the log level string into a tracing::Level
    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            ))),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            on_setup_failure: SetupFailurePolicy::default(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// Hourly file sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    /// Directory name, created under the working directory and
    /// looked up next to the binary
    pub dir_name: String,
    /// Goes between the hour bucket and `.log`
    pub suffix: String,
    /// Layout of `tracing` events written to the file
    pub format: LogFormat,
    /// Layout of lines written by the line logger
    pub line_format: LineFormat,
    /// What happens to lines while the file cannot be written
    pub on_write_failure: RecoveryStrategy,
}

impl FileConfig {
    /// Pure validation, nothing is created on disk here
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.enabled {
            if self.dir_name.trim().is_empty() {
                return Err(LoggerError::config(
                    "Log directory name cannot be empty when file output is enabled",
                ));
            }
            if self.dir_name.contains(['/', '\\']) || self.suffix.contains(['/', '\\']) {
                return Err(LoggerError::config(
                    "Log directory name and suffix must not contain path separators",
                ));
            }
        }
        Ok(())
    }

    pub fn resolver(&self) -> LogFileResolver {
        LogFileResolver::new(self.suffix.clone()).with_dir_name(self.dir_name.clone())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir_name: LOG_DIR_NAME.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            format: LogFormat::default(),
            line_format: LineFormat::default(),
            on_write_failure: RecoveryStrategy::default(),
        }
    }
}

/// Log format options for `tracing` output
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

/// Startup behaviour when the log directory or file cannot be set up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetupFailurePolicy {
    /// Return the error so the process exits
    #[default]
    Abort,
    /// Keep running with console output only
    ConsoleOnly,
}

//! Run mode of the application

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::config::error::ConfigError;

/// Run mode injected into the loggers
///
/// Debug and test runs echo formatted log lines to the console;
/// production keeps them off stdout.
///
/// Parsing is case-insensitive everywhere: files, `BACKEND_UTILS_*` variables
/// and the command line all go through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Mode {
    #[default]
    Debug,
    Test,
    Production,
}

impl Mode {
    /// Environment variable name for reading the current mode
    pub const ENV_VAR: &'static str = "BACKEND_UTILS_MODE";

    /// Read the mode from `BACKEND_UTILS_MODE`
    ///
    /// Returns `Debug` if the variable is not set or cannot be parsed.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Debug => "debug",
            Mode::Test => "test",
            Mode::Production => "production",
        }
    }

    pub fn echoes_to_console(&self) -> bool {
        matches!(self, Mode::Debug | Mode::Test)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dev" | "development" => Ok(Mode::Debug),
            "test" => Ok(Mode::Test),
            "production" | "prod" | "release" => Ok(Mode::Production),
            _ => Err(ConfigError::EnvVarError(format!(
                "Invalid mode '{}'. Valid values are: debug, test, production",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

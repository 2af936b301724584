//! Configuration loader for backend-utils
//!
//! Loads settings from layered TOML files plus `BACKEND_UTILS_*` environment
//! variables. Every field has a compiled-in default, so no file is required.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, Map, builder::DefaultState};

use crate::config::error::ConfigError;
use crate::config::mode::Mode;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "BACKEND_UTILS_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "BACKEND_UTILS_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "BACKEND_UTILS";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml`
/// 2. `{mode}.toml`
/// 3. `local.toml`
/// 4. `BACKEND_UTILS_*` environment variables
///
/// When a single configuration file is given, it replaces steps 1-3 and must exist.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    mode: Mode,
    /// Read instead of the process environment when set
    env_vars: Option<Map<String, String>>,
}

impl ConfigLoader {
    /// Create a loader from `BACKEND_UTILS_CONFIG_DIR`, `BACKEND_UTILS_CONFIG_FILE`
    /// and `BACKEND_UTILS_MODE`
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        Self {
            config_dir,
            config_file: std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
            mode: Mode::from_env(),
            env_vars: None,
        }
    }

    /// Layered loading from `dir`, picking `{mode}.toml`
    pub fn from_dir(dir: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            config_dir: dir.into(),
            config_file: None,
            mode,
            env_vars: None,
        }
    }

    /// Load a single file instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Take `BACKEND_UTILS_*` overrides from `vars` instead of the process environment
    pub fn with_env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Load and validate settings from all sources
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // BACKEND_UTILS_SERVER__PORT -> server.port
        let builder = self.add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, false)?;

        let mode_path = self.config_dir.join(format!("{}.toml", self.mode.as_str()));
        let builder = Self::add_file_source(builder, &mode_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(&self, builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true)
                .source(self.env_vars.clone()),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

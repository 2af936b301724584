//! Configuration management module for backend-utils
//!
//! Layered loading, lowest priority first:
//! 1. `default.toml`
//! 2. `{mode}.toml` (`debug`, `test` or `production`)
//! 3. `local.toml`
//! 4. `BACKEND_UTILS_*` environment variables
//!
//! Command-line overrides are applied on top by the CLI.

pub mod error;
pub mod loader;
pub mod mode;
pub mod settings;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use mode::Mode;
pub use settings::{ApplicationConfig, ServerConfig, Settings};

//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;
use crate::config::Mode;

/// Backend helper service: request ids, response envelopes and hourly log files
#[derive(Parser, Debug)]
#[command(name = "backend-utils")]
#[command(about = "Backend helper service with hourly log files")]
#[command(long_about = "
backend-utils runs a small HTTP service that tags every request with an id,
answers failures with a {status, description} envelope and appends stamped
lines to an hourly log file next to the binary.

EXAMPLES:
    # Start the server with default configuration
    backend-utils serve

    # Start server on custom host and port
    backend-utils serve --host 0.0.0.0 --port 8080

    # Use a custom configuration file in production mode
    backend-utils --config /etc/backend-utils.toml --mode production serve

    # Validate configuration and show where log lines would go
    backend-utils check
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads this TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Run mode: debug (dev), test or production (prod)
    ///
    /// Picks `config/{mode}.toml` and decides whether log lines are
    /// echoed to the console.
    #[arg(short, long, env = "BACKEND_UTILS_MODE", value_parser = super::validation::parse_mode)]
    pub mode: Option<Mode>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   backend-utils serve                           # Start with defaults
    ///   backend-utils serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    Serve {
        /// Host address to bind to
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 8080
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override, takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },
    /// Validate configuration and print the resolved log file path
    Check,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

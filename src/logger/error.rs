//! Error types for the hourly log sink

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, opening or configuring the log sink
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The OS could not report where the running binary lives
    #[error("Failed to resolve executable location: {source}")]
    ExecutableLookupFailed {
        #[source]
        source: io::Error,
    },

    /// Creating the log directory failed for a reason other than pre-existence
    #[error("Failed to create log directory {}: {source}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bucket format cannot be rendered for a civil time
    #[error("Failed to format bucket key with '{format}': {source}")]
    BucketFormatFailed {
        format: String,
        #[source]
        source: jiff::Error,
    },

    #[error("empty file name")]
    EmptyFileName,

    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

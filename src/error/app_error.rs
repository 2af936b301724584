use thiserror::Error;

/// Errors a handler can return; each one renders as a [`ResponseEnvelope`].
///
/// [`ResponseEnvelope`]: crate::api::dto::ResponseEnvelope
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or unusable request
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// No route or resource matched
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Request handled, but the caller should know something was off
    #[error("Warning: {message}")]
    Warning { message: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        AppError::Warning {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

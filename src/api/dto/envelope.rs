//! Two-field response envelope for error and warning conditions.

use serde::{Deserialize, Serialize};

use crate::utils::json::create_json;

/// Severity carried by [`ResponseEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Error,
    Warning,
}

/// `{"status":"error"|"warning","description":"..."}`
///
/// Field order is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: ResponseStatus,
    pub description: String,
}

impl ResponseEnvelope {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            description: description.into(),
        }
    }

    pub fn warning(description: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Warning,
            description: description.into(),
        }
    }

    /// Compact JSON bytes
    pub fn to_json(&self) -> Vec<u8> {
        create_json(self)
    }
}

//! JSON marshalling helpers
//!
//! `create_json` is lossy: a value that cannot be serialized yields an empty
//! payload instead of an error.

use std::borrow::Cow;

use serde::Serialize;

/// Serialize `value` as compact JSON, or return an empty buffer on failure
pub fn create_json<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "JSON marshal failed, returning empty payload");
            Vec::new()
        }
    }
}

/// One argument to [`log_as_json`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogPart {
    /// Written as-is
    Text(String),
    /// Already marshalled by `create_json`; empty if marshalling failed
    Json(Vec<u8>),
}

impl LogPart {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        LogPart::Json(create_json(value))
    }

    pub fn render(&self) -> Cow<'_, str> {
        match self {
            LogPart::Text(text) => Cow::Borrowed(text),
            LogPart::Json(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

impl From<&str> for LogPart {
    fn from(text: &str) -> Self {
        LogPart::Text(text.to_string())
    }
}

impl From<String> for LogPart {
    fn from(text: String) -> Self {
        LogPart::Text(text)
    }
}

/// Concatenate the parts with no separator
pub fn log_as_json(parts: &[LogPart]) -> String {
    parts.iter().map(|part| part.render()).collect()
}

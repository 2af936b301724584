//! Application state for Axum web framework.

use std::sync::Arc;

use crate::config::Mode;
use crate::logger::LineLogger;

/// Shared state handed to every handler.
///
/// Cloning is cheap; the line logger sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub line_logger: Arc<LineLogger>,
    pub version: String,
}

impl AppState {
    pub fn new(line_logger: LineLogger, version: impl Into<String>) -> Self {
        Self {
            line_logger: Arc::new(line_logger),
            version: version.into(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.line_logger.mode()
    }
}

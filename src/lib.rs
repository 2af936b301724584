//! backend-utils library
//!
//! Helpers shared by web-service backends: request ids, `{status,
//! description}` response envelopes, hour-bucketed log files and lossy JSON
//! marshalling.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

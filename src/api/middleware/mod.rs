//! Middleware components for request processing.
//!
//! Request ID tagging, request logging and error-to-envelope conversion.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::{handle_json_rejection, not_found_fallback};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

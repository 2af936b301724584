//! Data Transfer Objects for API requests and responses.

mod envelope;
mod health;

pub use envelope::{ResponseEnvelope, ResponseStatus};
pub use health::HealthResponse;

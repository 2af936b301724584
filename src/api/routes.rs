//! Router configuration for the API.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, not_found_fallback, request_id_middleware};
use crate::state::AppState;

/// Creates the application router.
///
/// # Middleware Order
/// Layers run in reverse order of declaration:
/// 1. Request ID middleware - tags the request and response
/// 2. Logging middleware - logs with the request ID
///
/// # Routes
/// - `GET /health`
/// - `POST /api/log`
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/log", post(handlers::log::write_log));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .fallback(not_found_fallback)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

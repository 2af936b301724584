//! Health check handler.

use axum::{Json, extract::State};

use crate::api::dto::HealthResponse;
use crate::state::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
        mode: state.mode().to_string(),
        log_file: state.line_logger.file_sink_active(),
    })
}

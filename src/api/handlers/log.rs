//! Line logging endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::middleware::{RequestId, handle_json_rejection};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::json::{LogPart, log_as_json};

/// `POST /api/log`
///
/// Strings are logged verbatim, any other JSON value as compact JSON.
/// The line is prefixed with the request ID.
pub async fn write_log(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(value) = payload.map_err(handle_json_rejection)?;

    let part = match value {
        Value::Null => return Err(AppError::warning("Nothing to log")),
        Value::String(text) => LogPart::Text(text),
        other => LogPart::json(&other),
    };

    let id = request_id
        .map(|Extension(id)| id.0)
        .unwrap_or_else(|| "unknown".to_string());
    let message = log_as_json(&[LogPart::Text(format!("[{}] ", id)), part]);

    state.line_logger.log(&[message]);

    Ok(StatusCode::ACCEPTED)
}

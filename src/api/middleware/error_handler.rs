//! Converts AppError and extractor rejections into envelope responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ResponseEnvelope;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - BadRequest → 400, error envelope
    /// - NotFound → 404, error envelope
    /// - Warning → 200, warning envelope
    /// - Internal → 500, error envelope with a generic description
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, ResponseEnvelope::error(message.as_str()))
            }
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, ResponseEnvelope::error(message.as_str()))
            }
            AppError::Warning { message } => {
                (StatusCode::OK, ResponseEnvelope::warning(message.as_str()))
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseEnvelope::error("An internal error occurred"),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

/// Maps a JSON body rejection to a bad request.
pub fn handle_json_rejection(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON format: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Missing or invalid Content-Type header, expected application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Failed to parse JSON request".to_string(),
    };

    AppError::bad_request(message)
}

/// Fallback for unmatched routes.
pub async fn not_found_fallback() -> AppError {
    AppError::not_found("The requested resource was not found")
}

//! Error types for the API layer.
//!
//! [`ApiError`] unifies the HTTP-visible failure modes and converts into
//! an Axum response with a JSON error body. Store validation failures map
//! to 400; nothing in this layer is fatal to the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rumbo_store::ValidationError;

/// Errors surfaced by the REST handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A store mutation rejected its input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A request carried an invalid parameter outside the store's
    /// validation surface (e.g. route endpoints with bad coordinates).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

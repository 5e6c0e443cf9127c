//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use dropln_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error: an [`AppError`] that renders as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::InvalidParent | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::UnsupportedType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let body = if err.kind.is_internal() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Internal server error"
            );
            ApiErrorResponse {
                error: "INTERNAL".to_string(),
                message: "Internal server error".to_string(),
            }
        } else {
            ApiErrorResponse {
                error: err.kind.to_string(),
                message: err.message,
            }
        };

        (status, Json(body)).into_response()
    }
}

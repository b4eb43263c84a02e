pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON envelope every error response is wrapped in.
///
/// Clients always see the same four fields:
/// - `code`: numeric identifier for dashboards (e.g. 1004)
/// - `error`: stable machine-readable name (e.g. "NOT_FOUND")
/// - `message`: text meant for humans
/// - `details`: extra structure, omitted when absent
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "The requested resource was not found"
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric identifier for logs and dashboards
    pub code: i32,
    /// Stable machine-readable name
    pub error: String,
    /// Text meant for humans
    pub message: String,
    /// Extra structure, left out of the JSON when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// The error type handlers return.
///
/// Domain error enums convert into this via `From` impls; axum then turns
/// it into an [`ErrorResponse`] body with the matching status code, logging
/// each occurrence at a severity that fits the variant.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            AppError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                msg,
            ),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                msg,
            ),
        };

        match code {
            ErrorCode::NotFound => tracing::info!(error_code = code.code(), "{}", message),
            ErrorCode::InternalError => tracing::error!(error_code = code.code(), "{}", message),
            ErrorCode::ServiceUnavailable => {
                tracing::warn!(error_code = code.code(), "{}", message)
            }
        }

        error_response(status, message, code)
    }
}

/// Build an enveloped error response without going through [`AppError`].
///
/// ```rust,ignore
/// use axum::http::StatusCode;
/// use axum_helpers::errors::{ErrorCode, error_response};
///
/// let response = error_response(
///     StatusCode::SERVICE_UNAVAILABLE,
///     "Dependency down".to_string(),
///     ErrorCode::ServiceUnavailable,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_absent_details() {
        let body = ErrorResponse {
            code: ErrorCode::NotFound.code(),
            error: ErrorCode::NotFound.as_str().to_string(),
            message: "gone".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 1004);
        assert_eq!(json["error"], "NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_each_variant_maps_to_its_status() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::InternalServerError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}

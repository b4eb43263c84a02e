use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Handler for routes that match nothing.
///
/// Used as the router-wide fallback. Entity-level lookups that miss return
/// their own empty-body 404 from the handler layer; this envelope is only for
/// unknown paths.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

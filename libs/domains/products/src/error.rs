use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// What can go wrong inside product operations.
///
/// Absence is not represented here: lookups return `Option` and deletes
/// return `bool`, and the handler layer decides what a miss means for its
/// response.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// Route through [`AppError`] so clients get the shared error envelope
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

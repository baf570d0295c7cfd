use axum::http::Uri;

use super::AppError;

pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found";

/// Fallback handler for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

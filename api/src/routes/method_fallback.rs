use axum::http::StatusCode;

use crate::error_handler::AppError;

/// OPTIONS preflight: empty 200; CORS headers come from the middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than POST/OPTIONS on an API route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Unknown path.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

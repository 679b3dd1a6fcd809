use axum::{
    http::Method,
    response::{IntoResponse, Response},
};

use super::AppError;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    AppError::NotFound("Not found.".to_string()).into_response()
}

/// 405 response for routes that only accept `allow`.
pub fn method_not_allowed(allow: Method) -> Response {
    AppError::MethodNotAllowed {
        message: "Method not allowed.".to_string(),
        allow,
    }
    .into_response()
}

/// Method-router fallback for POST-only routes.
pub async fn post_only() -> Response {
    method_not_allowed(Method::POST)
}

pub mod handlers;

use axum::{
    Json,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Client-facing error body.
///
/// Carries one fixed, generic message per error kind. Internal detail stays
/// in the server logs.
///
/// ```json
/// { "error": "Failed to store memory." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// The `String` payloads are the client-visible messages; callers log any
/// internal detail before constructing the error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed: {message}")]
    MethodNotAllowed { message: String, allow: Method },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::MethodNotAllowed { message, allow } => {
                let mut response =
                    (StatusCode::METHOD_NOT_ALLOWED, Json(ErrorResponse::new(message)))
                        .into_response();
                if let Ok(value) = allow.as_str().parse() {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                return response;
            }
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

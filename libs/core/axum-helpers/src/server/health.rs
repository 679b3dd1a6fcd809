use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Liveness payload, also used for the method-mismatch reply on `/health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `"success"` or `"error"`
    pub status: String,
    pub message: String,
}

/// Health check endpoint handler.
///
/// Always 200 while the process is serving. Makes no outbound calls.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = StatusResponse),
        (status = 405, description = "Method other than GET", body = StatusResponse)
    )
)]
pub async fn health_handler() -> Response {
    let response = StatusResponse {
        status: "success".to_string(),
        message: "API is running and healthy!".to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

async fn health_method_not_allowed() -> Response {
    let response = StatusResponse {
        status: "error".to_string(),
        message: "Method not allowed. Use GET.".to_string(),
    };

    let mut response = (StatusCode::METHOD_NOT_ALLOWED, Json(response)).into_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET"));
    response
}

/// Creates a router with the /health endpoint.
///
/// GET answers with the liveness payload; every other method gets a 405.
pub fn health_router() -> Router {
    Router::new().route(
        "/health",
        get(health_handler).fallback(health_method_not_allowed),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(health_handler),
    components(schemas(StatusResponse)),
    tags((name = "health", description = "Liveness"))
)]
pub struct HealthApiDoc;

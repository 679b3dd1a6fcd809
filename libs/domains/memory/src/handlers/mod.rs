mod memory;

use axum::{Router, routing::post};
use axum_helpers::errors::handlers::post_only;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::repository::MemoryIndex;
use crate::service::MemoryService;

pub use memory::{
    RetrieveMemoryRequest, StoreMemoryRequest, StoreMemoryResponse, retrieve_memory, store_memory,
};

/// OpenAPI documentation for the memory endpoints
#[derive(OpenApi)]
#[openapi(
    paths(memory::store_memory, memory::retrieve_memory),
    components(schemas(StoreMemoryRequest, StoreMemoryResponse, RetrieveMemoryRequest)),
    tags(
        (name = "memory", description = "Embed, store and retrieve text memories")
    )
)]
pub struct MemoryApiDoc;

/// Create router for the memory endpoints
///
/// Both routes accept POST only; other methods get 405 with `Allow: POST`.
pub fn router<I: MemoryIndex + 'static>(service: MemoryService<I>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/store-memory",
            post(memory::store_memory::<I>).fallback(post_only),
        )
        .route(
            "/retrieve-memory",
            post(memory::retrieve_memory::<I>).fallback(post_only),
        )
        .with_state(shared_service)
}

use axum_helpers::HealthApiDoc;
use domain_memory::MemoryApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Memory API",
        version = "0.1.0",
        description = "Store texts as embeddings and retrieve the nearest ones"
    )
)]
struct ApiInfo;

/// Full API document: service info plus the health and memory endpoints
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ApiInfo::openapi();
        doc.merge(HealthApiDoc::openapi());
        doc.merge(MemoryApiDoc::openapi());
        doc
    }
}

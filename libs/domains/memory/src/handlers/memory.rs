//! REST handlers for the store and retrieve operations

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{MemoryError, MemoryResult, messages};
use crate::models::{MemoryQuery, StoreMemory};
use crate::repository::MemoryIndex;
use crate::service::MemoryService;

// ===== Request/Response DTOs =====

/// Request to store a memory
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreMemoryRequest {
    /// Caller-chosen id; storing the same id again overwrites
    #[validate(required, length(min = 1))]
    #[schema(example = "msg-42")]
    pub message_id: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(example = "The user prefers dark mode.")]
    pub text: Option<String>,
}

impl TryFrom<StoreMemoryRequest> for StoreMemory {
    type Error = MemoryError;

    fn try_from(request: StoreMemoryRequest) -> MemoryResult<Self> {
        let invalid = || MemoryError::Validation(messages::STORE_FIELDS_REQUIRED);
        request.validate().map_err(|_| invalid())?;

        Ok(StoreMemory {
            message_id: request.message_id.ok_or_else(invalid)?,
            text: request.text.ok_or_else(invalid)?,
        })
    }
}

/// Request to retrieve memories, by vector or by text
///
/// `queryEmbedding` takes precedence when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveMemoryRequest {
    #[schema(value_type = Option<Vec<f32>>, example = json!([0.011, -0.024, 0.37]))]
    pub query_embedding: Option<Value>,
    #[schema(value_type = Option<String>, example = "What theme does the user like?")]
    pub query_text: Option<Value>,
}

impl TryFrom<RetrieveMemoryRequest> for MemoryQuery {
    type Error = MemoryError;

    fn try_from(request: RetrieveMemoryRequest) -> MemoryResult<Self> {
        match (request.query_embedding, request.query_text) {
            (Some(embedding), _) => parse_embedding(&embedding).map(MemoryQuery::Embedding),
            (None, Some(Value::String(text))) if !text.is_empty() => Ok(MemoryQuery::Text(text)),
            (None, Some(_)) => Err(MemoryError::Validation(messages::QUERY_TEXT_REQUIRED)),
            (None, None) => Err(MemoryError::Validation(messages::QUERY_EMBEDDING_INVALID)),
        }
    }
}

/// Accepts a non-empty array made only of numbers.
fn parse_embedding(value: &Value) -> MemoryResult<Vec<f32>> {
    let invalid = || MemoryError::Validation(messages::QUERY_EMBEDDING_INVALID);

    let items = value.as_array().filter(|items| !items.is_empty()).ok_or_else(invalid)?;
    items
        .iter()
        .map(|item| item.as_f64().map(|n| n as f32).ok_or_else(invalid))
        .collect()
}

/// Response for a successful store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreMemoryResponse {
    #[schema(example = "Memory stored.")]
    pub message: String,
}

impl StoreMemoryResponse {
    pub fn stored() -> Self {
        Self {
            message: "Memory stored.".to_string(),
        }
    }
}

fn log_failure(operation: &str, err: &MemoryError) {
    match err {
        MemoryError::Validation(reason) => warn!(operation, reason, "Rejected request"),
        other => error!(operation, error = %other, "Operation failed"),
    }
}

// ===== Handlers =====

/// Embed a text and store it under the caller's message id
#[utoipa::path(
    post,
    path = "/store-memory",
    tag = "memory",
    request_body = StoreMemoryRequest,
    responses(
        (status = 200, description = "Memory stored", body = StoreMemoryResponse),
        (status = 400, description = "messageId or text missing", body = axum_helpers::ErrorResponse),
        (status = 405, description = "Method not allowed", body = axum_helpers::ErrorResponse),
        (status = 500, description = "Embedding or index failure", body = axum_helpers::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn store_memory<I: MemoryIndex>(
    State(service): State<Arc<MemoryService<I>>>,
    payload: Result<Json<StoreMemoryRequest>, JsonRejection>,
) -> MemoryResult<Json<StoreMemoryResponse>> {
    let input = payload
        .map_err(|rejection| {
            warn!(reason = %rejection.body_text(), "Unreadable store body");
            MemoryError::Validation(messages::STORE_FIELDS_REQUIRED)
        })
        .and_then(|Json(request)| StoreMemory::try_from(request))
        .inspect_err(|e| log_failure("store_memory", e))?;

    let message_id = input.message_id.clone();
    service
        .store(input)
        .await
        .inspect_err(|e| log_failure("store_memory", e))?;

    info!(message_id = %message_id, "Memory stored");
    Ok(Json(StoreMemoryResponse::stored()))
}

/// Return the texts of the five nearest stored memories
#[utoipa::path(
    post,
    path = "/retrieve-memory",
    tag = "memory",
    request_body = RetrieveMemoryRequest,
    responses(
        (status = 200, description = "Stored texts, nearest first", body = Vec<String>),
        (status = 400, description = "Query missing or malformed", body = axum_helpers::ErrorResponse),
        (status = 405, description = "Method not allowed", body = axum_helpers::ErrorResponse),
        (status = 500, description = "Embedding or index failure", body = axum_helpers::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn retrieve_memory<I: MemoryIndex>(
    State(service): State<Arc<MemoryService<I>>>,
    payload: Result<Json<RetrieveMemoryRequest>, JsonRejection>,
) -> MemoryResult<Json<Vec<String>>> {
    let query = payload
        .map_err(|rejection| {
            warn!(reason = %rejection.body_text(), "Unreadable retrieve body");
            MemoryError::Validation(messages::QUERY_EMBEDDING_INVALID)
        })
        .and_then(|Json(request)| MemoryQuery::try_from(request))
        .inspect_err(|e| log_failure("retrieve_memory", e))?;

    let texts = service
        .retrieve(query)
        .await
        .inspect_err(|e| log_failure("retrieve_memory", e))?;

    info!(count = texts.len(), "Memories retrieved");
    Ok(Json(texts))
}

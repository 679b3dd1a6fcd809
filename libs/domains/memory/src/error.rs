use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::INTERNAL_ERROR_MESSAGE;
use thiserror::Error;

/// Client-facing messages, one per failure kind
pub mod messages {
    pub const STORE_FIELDS_REQUIRED: &str = "messageId and text are required.";
    pub const QUERY_EMBEDDING_INVALID: &str = "queryEmbedding must be an array.";
    pub const QUERY_TEXT_REQUIRED: &str = "queryText is required.";
    pub const STORE_FAILED: &str = "Failed to store memory.";
    pub const RETRIEVE_FAILED: &str = "Failed to retrieve memory.";
}

#[derive(Debug, Error)]
pub enum MemoryError {
    /// Caller input missing or malformed; carries the client message
    #[error("Invalid input: {0}")]
    Validation(&'static str),

    #[error("Embedding generation failed: {0}")]
    EmbeddingGeneration(String),

    #[error("Storage failed: {0}")]
    Storage(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Re-labels a failure inside the store operation as `Storage`.
    pub fn into_storage(self) -> Self {
        match self {
            MemoryError::Storage(_) | MemoryError::Validation(_) => self,
            other => MemoryError::Storage(other.to_string()),
        }
    }

    /// Re-labels a failure inside the retrieve operation as `Retrieval`.
    pub fn into_retrieval(self) -> Self {
        match self {
            MemoryError::Retrieval(_) | MemoryError::Validation(_) => self,
            other => MemoryError::Retrieval(other.to_string()),
        }
    }
}

/// Convert MemoryError to AppError; only the fixed message reaches the client
impl From<MemoryError> for AppError {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::Validation(msg) => AppError::BadRequest(msg.to_string()),
            MemoryError::Storage(_) => {
                AppError::InternalServerError(messages::STORE_FAILED.to_string())
            }
            MemoryError::Retrieval(_) => {
                AppError::InternalServerError(messages::RETRIEVE_FAILED.to_string())
            }
            MemoryError::EmbeddingGeneration(_) | MemoryError::Config(_) => {
                AppError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for MemoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

use async_trait::async_trait;

use crate::error::MemoryResult;
use crate::models::Embedding;

/// Trait for embedding generation providers
///
/// One call per text; implementations neither retry nor cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> MemoryResult<Embedding>;
}

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::embedding::EmbeddingProvider;
use crate::error::MemoryResult;
use crate::models::{
    DEFAULT_NAMESPACE, DEFAULT_TOP_K, MemoryQuery, MemoryRecord, QueryRequest, StoreMemory,
};
use crate::repository::MemoryIndex;

/// Memory service providing the store and retrieve operations
///
/// Combines the vector index (Pinecone) with embedding generation (OpenAI).
/// Every call targets the namespace fixed at construction.
pub struct MemoryService<I: MemoryIndex> {
    index: I,
    embedder: Arc<dyn EmbeddingProvider>,
    namespace: String,
    top_k: u32,
}

impl<I: MemoryIndex> MemoryService<I> {
    pub fn new(index: I, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            index,
            embedder,
            namespace: DEFAULT_NAMESPACE.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Embed the text and upsert it under the caller's id.
    ///
    /// An embedding failure returns before the index is touched.
    #[instrument(skip(self, input), fields(message_id = %input.message_id, namespace = %self.namespace))]
    pub async fn store(&self, input: StoreMemory) -> MemoryResult<()> {
        let embedding = self
            .embedder
            .embed(&input.text)
            .await
            .map_err(|e| e.into_storage())?;

        debug!(
            dimension = embedding.dimension,
            tokens_used = embedding.tokens_used,
            "Embedding generated"
        );

        let record = MemoryRecord::new(input.message_id, embedding.values, input.text);
        self.index
            .upsert(&self.namespace, record)
            .await
            .map_err(|e| e.into_storage())
    }

    /// Query the index and return the stored texts in index order.
    ///
    /// Matches without `text` metadata are skipped, so the result can be
    /// shorter than the match list the index returned.
    #[instrument(skip(self, query), fields(query_kind = query.kind(), namespace = %self.namespace))]
    pub async fn retrieve(&self, query: MemoryQuery) -> MemoryResult<Vec<String>> {
        let vector = match query {
            MemoryQuery::Embedding(vector) => vector,
            MemoryQuery::Text(text) => {
                let embedding = self
                    .embedder
                    .embed(&text)
                    .await
                    .map_err(|e| e.into_retrieval())?;
                debug!(tokens_used = embedding.tokens_used, "Query embedding generated");
                embedding.values
            }
        };

        let matches = self
            .index
            .query(&self.namespace, QueryRequest::new(vector, self.top_k))
            .await
            .map_err(|e| e.into_retrieval())?;

        let texts = matches
            .iter()
            .filter_map(|m| {
                let text = m.text();
                if text.is_none() {
                    warn!(match_id = %m.id, "Match has no text metadata, skipping");
                }
                text.map(str::to_string)
            })
            .collect();

        Ok(texts)
    }
}

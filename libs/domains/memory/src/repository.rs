use async_trait::async_trait;

use crate::error::MemoryResult;
use crate::models::{MemoryRecord, QueryMatch, QueryRequest};

/// Repository trait for the external vector index
///
/// Every call is scoped to one namespace. Upserts overwrite by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemoryIndex: Send + Sync {
    /// Insert or overwrite a single record
    async fn upsert(&self, namespace: &str, record: MemoryRecord) -> MemoryResult<()>;

    /// Nearest-neighbour query; matches come back in index order
    async fn query(&self, namespace: &str, request: QueryRequest) -> MemoryResult<Vec<QueryMatch>>;
}

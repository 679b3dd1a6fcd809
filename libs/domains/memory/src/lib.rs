//! Memory Domain Library
//!
//! Stores short texts as embeddings in a managed vector index and retrieves
//! the nearest ones back as text.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  MemoryService  │  ← store / retrieve, fixed namespace and top-K
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │   MemoryIndex   │     │ EmbeddingProvider│
//! │    (trait)      │     │     (trait)      │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//! ┌────────▼────────┐     ┌────────▼─────────┐
//! │  PineconeIndex  │     │  OpenAIProvider  │
//! │  (REST client)  │     │  (REST client)   │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_memory::{
//!     MemoryService, OpenAIConfig, OpenAIProvider, PineconeConfig, PineconeIndex,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pinecone = PineconeConfig::from_env()?;
//! let namespace = pinecone.namespace.clone();
//! let index = PineconeIndex::connect(pinecone).await?;
//! let embedder = OpenAIProvider::new(OpenAIConfig::from_env()?)?;
//!
//! let service = MemoryService::new(index, Arc::new(embedder)).with_namespace(namespace);
//! let router = domain_memory::handlers::router(service);
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pinecone;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{MemoryError, MemoryResult};
pub use handlers::MemoryApiDoc;
pub use models::{
    DEFAULT_NAMESPACE, DEFAULT_TOP_K, Embedding, MemoryMetadata, MemoryQuery, MemoryRecord,
    QueryMatch, QueryRequest, StoreMemory,
};
pub use pinecone::{PineconeConfig, PineconeIndex};
pub use repository::MemoryIndex;
pub use service::MemoryService;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partition used when the deployment does not configure one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Number of neighbours returned by a retrieve
pub const DEFAULT_TOP_K: u32 = 5;

/// Metadata stored next to each vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetadata {
    pub text: String,
}

/// A stored memory: caller id, embedding and the original text.
///
/// Re-storing the same id overwrites the previous record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: MemoryMetadata,
}

impl MemoryRecord {
    pub fn new(id: String, values: Vec<f32>, text: String) -> Self {
        Self {
            id,
            values,
            metadata: MemoryMetadata { text },
        }
    }
}

/// Validated input for the store operation
#[derive(Debug, Clone, PartialEq)]
pub struct StoreMemory {
    pub message_id: String,
    pub text: String,
}

/// Validated input for the retrieve operation
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryQuery {
    /// Caller supplied the query vector
    Embedding(Vec<f32>),
    /// Caller supplied text that is embedded before querying
    Text(String),
}

impl MemoryQuery {
    pub fn kind(&self) -> &'static str {
        match self {
            MemoryQuery::Embedding(_) => "embedding",
            MemoryQuery::Text(_) => "text",
        }
    }
}

/// Nearest-neighbour query against one namespace
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub vector: Vec<f32>,
    pub top_k: u32,
    pub include_values: bool,
    pub include_metadata: bool,
}

impl QueryRequest {
    pub fn new(vector: Vec<f32>, top_k: u32) -> Self {
        Self {
            vector,
            top_k,
            include_values: false,
            include_metadata: true,
        }
    }
}

/// One match as ranked by the index
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub values: Option<Vec<f32>>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl QueryMatch {
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
            values: None,
            metadata: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert("text".to_string(), Value::String(text.into()));
        self
    }

    /// The stored `text` metadata, if present and a string
    pub fn text(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("text")?.as_str()
    }
}

/// Embedding result
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            dimension: values.len() as u32,
            values,
            tokens_used: 0,
        }
    }
}

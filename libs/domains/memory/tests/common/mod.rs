//! In-memory fakes shared by the handler tests
#![allow(dead_code)]

use async_trait::async_trait;
use domain_memory::{
    Embedding, EmbeddingProvider, MemoryError, MemoryIndex, MemoryRecord, MemoryResult,
    QueryMatch, QueryRequest,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Embedder returning a vector derived from the text length
#[derive(Clone, Default)]
pub struct FakeEmbedder {
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let embedder = Self::default();
        embedder.fail.store(true, Ordering::SeqCst);
        embedder
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> MemoryResult<Embedding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MemoryError::EmbeddingGeneration(
                "embedding API returned 500".to_string(),
            ));
        }
        Ok(Embedding::new(vec![text.len() as f32, 1.0, 0.0]))
    }
}

/// Index keeping records in a map keyed by (namespace, id)
#[derive(Clone, Default)]
pub struct InMemoryIndex {
    records: Arc<Mutex<HashMap<(String, String), MemoryRecord>>>,
    canned_matches: Arc<Mutex<Vec<QueryMatch>>>,
    queries: Arc<Mutex<Vec<(String, QueryRequest)>>>,
    upserts: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let index = Self::default();
        index.fail.store(true, Ordering::SeqCst);
        index
    }

    /// Matches returned by every query, in this order
    pub fn with_matches(self, matches: Vec<QueryMatch>) -> Self {
        *self.canned_matches.lock().unwrap() = matches;
        self
    }

    pub fn record(&self, namespace: &str, id: &str) -> Option<MemoryRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), id.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<(String, QueryRequest)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemoryIndex for InMemoryIndex {
    async fn upsert(&self, namespace: &str, record: MemoryRecord) -> MemoryResult<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MemoryError::Storage("index returned 503".to_string()));
        }
        self.records
            .lock()
            .unwrap()
            .insert((namespace.to_string(), record.id.clone()), record);
        Ok(())
    }

    async fn query(&self, namespace: &str, request: QueryRequest) -> MemoryResult<Vec<QueryMatch>> {
        self.queries
            .lock()
            .unwrap()
            .push((namespace.to_string(), request));
        if self.fail.load(Ordering::SeqCst) {
            return Err(MemoryError::Retrieval("index returned 503".to_string()));
        }
        Ok(self.canned_matches.lock().unwrap().clone())
    }
}

//! Memory HTTP Service
//!
//! Embeds texts through OpenAI and keeps them in a Pinecone index so callers
//! can recall the nearest ones later.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (JSON over HTTP)
//! axum router (CORS, tracing, timeout, compression)
//!   ↓
//! MemoryService (domain layer)
//!   ↓
//! ┌───────────────┬──────────────────┐
//! │ PineconeIndex │ OpenAIProvider   │
//! └───────────────┴──────────────────┘
//!   ↓                  ↓
//! Pinecone          OpenAI API
//! ```
//!
//! ## Endpoints
//!
//! - `GET /health`: liveness
//! - `POST /store-memory`: `{ messageId, text }` → embed → upsert
//! - `POST /retrieve-memory`: `{ queryEmbedding }` or `{ queryText }` → top 5 texts
//!
//! ## Modules
//!
//! - `config`: environment-driven configuration
//! - `openapi`: merged OpenAPI document
//! - `server`: startup and lifecycle

pub mod config;
pub mod openapi;
pub mod server;

pub use server::{app_routes, run};

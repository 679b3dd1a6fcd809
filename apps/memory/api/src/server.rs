//! HTTP server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Configuration and tracing initialization
//! - OpenAI and Pinecone client construction
//! - Service creation and routing
//! - HTTP server startup with graceful shutdown

use std::sync::Arc;

use axum::Router;
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_memory::{MemoryIndex, MemoryService, OpenAIProvider, PineconeIndex, handlers};
use eyre::{Result, WrapErr};
use tracing::info;

use crate::config::Config;
use crate::openapi::ApiDoc;

/// Routes served by this binary: the memory endpoints plus `/health`
pub fn app_routes<I: MemoryIndex + 'static>(service: MemoryService<I>) -> Router {
    handlers::router(service).merge(health_router())
}

/// Run the HTTP server
///
/// This is the main entry point for server initialization. It:
/// 1. Loads configuration and sets up structured logging (JSON for prod, pretty for dev)
/// 2. Builds the OpenAI embedding client
/// 3. Connects to the Pinecone index, resolving its host if needed
/// 4. Serves the API until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - A required environment variable is missing or malformed
/// - The Pinecone index host cannot be resolved
/// - Server binding fails
pub async fn run() -> Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // A missing .env is fine; variables already in the process take precedence
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let embedder = OpenAIProvider::new(config.openai.clone())
        .wrap_err("Failed to build OpenAI embedding client")?;
    info!(model = %embedder.model(), "OpenAI embedding provider configured");

    let namespace = config.pinecone.namespace.clone();
    info!("Connecting to Pinecone index {}...", config.pinecone.index_name);
    let index = PineconeIndex::connect(config.pinecone.clone())
        .await
        .wrap_err("Failed to connect to Pinecone")?;

    let service = MemoryService::new(index, Arc::new(embedder)).with_namespace(namespace);
    info!(namespace = %service.namespace(), "Memory service ready");

    let router = create_router::<ApiDoc>(app_routes(service), &config.server)
        .await
        .wrap_err("Failed to build router")?;

    create_app(router, &config.server)
        .await
        .wrap_err("HTTP server failed")?;

    Ok(())
}

//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - The liveness endpoint
//! - Graceful shutdown on SIGINT/SIGTERM
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let routes = api_routes.merge(health_router());
//! let router = create_router::<ApiDoc>(routes, &config).await?;
//!
//! create_app(router, &config).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthApiDoc, StatusResponse, health_router};
pub use shutdown::shutdown_signal;

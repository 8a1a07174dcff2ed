//! # Axum Helpers
//!
//! Utilities for assembling and running Axum web applications.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly (docs, tracing, 404 fallback) and the
//!   server loop with graceful shutdown
//! - **[`health`]**: liveness endpoint plumbing
//! - **[`errors`]**: structured error responses and fallback handlers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod health;
pub mod server;
pub mod shutdown;

pub use errors::ErrorResponse;
pub use health::{health_handler, HealthResponse};
pub use server::{create_app, create_router};
pub use shutdown::shutdown_signal;

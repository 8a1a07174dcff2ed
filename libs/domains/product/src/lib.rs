//! Product Domain
//!
//! Resilient CRUD over bank products stored in MongoDB, with per-operation
//! circuit breakers and change notifications published after successful writes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (marshaling only)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌───────────────┐
//! │   Service   │ ──> │ CircuitGuards │  ← one breaker + fallback per operation
//! └──────┬──────┘     └───────────────┘
//!        │ merge on update
//! ┌──────▼──────┐     ┌───────────────┐
//! │ Repository  │     │   Publisher   │  ← fire-and-forget on create/update
//! └──────┬──────┘     └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, patch payload, response envelope
//! └─────────────┘
//! ```
//!
//! Every service operation is infallible at the signature level: failures —
//! business-rule and store-level alike — are intercepted by the operation's
//! circuit guard and converted into a degraded value carrying the error
//! message. Callers detect degraded responses by inspecting payload fields,
//! never by catching errors.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_product::{
//!     handlers,
//!     dapr::DaprProductPublisher,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoProductRepository::new(&db);
//! let publisher = DaprProductPublisher::from_env();
//! let service = ProductService::new(repository, publisher);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod dapr;
pub mod error;
pub mod handlers;
pub mod merge;
pub mod messages;
pub mod models;
pub mod mongodb;
pub mod publisher;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use dapr::DaprProductPublisher;
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use merge::merge;
pub use messages::Messages;
pub use models::{Condition, ConditionPatch, CreateProduct, Product, Response, UpdateProduct};
pub use mongodb::MongoProductRepository;
pub use publisher::{ProductPublisher, SAVED_PRODUCT_TOPIC};
pub use repository::{ProductRepository, ProductStream};
pub use service::{CircuitSettings, ProductService};

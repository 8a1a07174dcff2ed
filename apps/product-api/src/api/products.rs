//! Products API routes

use axum::Router;
use domain_product::{handlers, DaprProductPublisher, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let publisher = DaprProductPublisher::from_env();
    let service = ProductService::new(repository, publisher)
        .with_messages(state.config.messages.clone())
        .with_circuits(state.config.circuits.clone());
    handlers::router(service)
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}

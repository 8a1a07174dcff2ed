use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Topic that receives every successfully written product.
pub const SAVED_PRODUCT_TOPIC: &str = "saved-product-topic";

/// One-way change notifier invoked after successful writes.
///
/// At-most-once: the service neither retries nor waits for acknowledgment,
/// and a publish failure never reaches the caller of the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductPublisher: Send + Sync {
    async fn publish(&self, product: &Product) -> ProductResult<()>;
}

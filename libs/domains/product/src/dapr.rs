//! Dapr pub/sub implementation of the product publisher.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::publisher::{ProductPublisher, SAVED_PRODUCT_TOPIC};

/// Publishes saved products to [`SAVED_PRODUCT_TOPIC`] through the Dapr
/// sidecar HTTP API.
#[derive(Clone)]
pub struct DaprProductPublisher {
    client: reqwest::Client,
    dapr_http_port: u16,
    pubsub_name: String,
}

impl DaprProductPublisher {
    pub fn new(dapr_http_port: u16, pubsub_name: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            dapr_http_port,
            pubsub_name: pubsub_name.into(),
        }
    }

    /// Create from `DAPR_HTTP_PORT` (default 3500) and `DAPR_PUBSUB_NAME`
    /// (default `product-pubsub`).
    pub fn from_env() -> Self {
        let port = std::env::var("DAPR_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3500);

        let pubsub_name =
            std::env::var("DAPR_PUBSUB_NAME").unwrap_or_else(|_| "product-pubsub".to_string());

        Self::new(port, pubsub_name)
    }

    fn publish_url(&self) -> String {
        format!(
            "http://localhost:{}/v1.0/publish/{}/{}",
            self.dapr_http_port, self.pubsub_name, SAVED_PRODUCT_TOPIC
        )
    }
}

#[async_trait]
impl ProductPublisher for DaprProductPublisher {
    #[instrument(skip(self, product), fields(product_name = %product.product_name))]
    async fn publish(&self, product: &Product) -> ProductResult<()> {
        let response = self
            .client
            .post(self.publish_url())
            .header("Content-Type", "application/json")
            .json(product)
            .send()
            .await
            .map_err(|e| {
                ProductError::Publish(format!("failed to reach Dapr sidecar: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProductError::Publish(format!(
                "publish failed with status {}: {}",
                status, body
            )));
        }

        info!(topic = SAVED_PRODUCT_TOPIC, "Product change published");
        Ok(())
    }
}

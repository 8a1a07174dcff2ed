use async_trait::async_trait;
use futures_util::stream::BoxStream;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};

/// Lazy sequence of products as yielded by the store.
pub type ProductStream = BoxStream<'static, ProductResult<Product>>;

/// Repository trait for Product persistence
///
/// Defines the data access port consumed by the service; implementations may
/// use different storage backends. `None`/`false` returns model the store
/// answering an otherwise-valid request with nothing — the service maps those
/// to its unexpected-empty failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Stream all stored products
    async fn find_all(&self) -> ProductResult<ProductStream>;

    /// Look up a product by its unique business name
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Persist a new product; the stored record carries the assigned id
    async fn create(&self, input: CreateProduct) -> ProductResult<Option<Product>>;

    /// Persist new field values for an existing product, matched by id
    async fn update(&self, product: Product) -> ProductResult<Option<Product>>;

    /// Remove a product by internal id; `true` when a record was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

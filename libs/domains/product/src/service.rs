//! Product Service - resilient business logic layer
//!
//! Every operation runs under its own circuit guard: failures are recorded
//! against that operation's breaker and converted into degraded values, so
//! callers never see an error — only payloads that may carry an error message
//! in a designated field.

use std::sync::Arc;

use futures_util::TryStreamExt;
use resilience::{CircuitBreakerConfig, CircuitGuard};
use tracing::{instrument, warn};
use validator::Validate;

use crate::error::ProductError;
use crate::merge::merge;
use crate::messages::Messages;
use crate::models::{CreateProduct, Product, Response, UpdateProduct};
use crate::publisher::ProductPublisher;
use crate::repository::ProductRepository;

/// Per-operation circuit breaker settings.
///
/// Each logical operation gets an independent failure budget; see
/// [`CircuitSettings::from_env`] for the `CIRCUIT_*` environment surface.
#[derive(Clone, Debug, Default)]
pub struct CircuitSettings {
    pub find_all: CircuitBreakerConfig,
    pub find_by_name: CircuitBreakerConfig,
    pub create: CircuitBreakerConfig,
    pub update: CircuitBreakerConfig,
    pub delete: CircuitBreakerConfig,
}

impl CircuitSettings {
    /// Load settings from the environment: `CIRCUIT_*` variables set the
    /// shared base, `CIRCUIT_FIND_ALL_*`, `CIRCUIT_FIND_BY_NAME_*`,
    /// `CIRCUIT_CREATE_*`, `CIRCUIT_UPDATE_*` and `CIRCUIT_DELETE_*` override
    /// per operation.
    pub fn from_env() -> Self {
        let base = CircuitBreakerConfig::from_env_prefixed("CIRCUIT", &CircuitBreakerConfig::default());
        Self {
            find_all: CircuitBreakerConfig::from_env_prefixed("CIRCUIT_FIND_ALL", &base),
            find_by_name: CircuitBreakerConfig::from_env_prefixed("CIRCUIT_FIND_BY_NAME", &base),
            create: CircuitBreakerConfig::from_env_prefixed("CIRCUIT_CREATE", &base),
            update: CircuitBreakerConfig::from_env_prefixed("CIRCUIT_UPDATE", &base),
            delete: CircuitBreakerConfig::from_env_prefixed("CIRCUIT_DELETE", &base),
        }
    }
}

struct OperationCircuits {
    find_all: CircuitGuard,
    find_by_name: CircuitGuard,
    create: CircuitGuard,
    update: CircuitGuard,
    delete: CircuitGuard,
}

impl OperationCircuits {
    fn new(settings: &CircuitSettings) -> Self {
        Self {
            find_all: CircuitGuard::new("product-find-all", settings.find_all.clone()),
            find_by_name: CircuitGuard::new("product-find-by-name", settings.find_by_name.clone()),
            create: CircuitGuard::new("product-create", settings.create.clone()),
            update: CircuitGuard::new("product-update", settings.update.clone()),
            delete: CircuitGuard::new("product-delete", settings.delete.clone()),
        }
    }
}

/// Product service orchestrating repository, merge and publisher.
pub struct ProductService<R: ProductRepository, P: ProductPublisher> {
    repository: Arc<R>,
    publisher: Arc<P>,
    messages: Arc<Messages>,
    circuits: Arc<OperationCircuits>,
}

impl<R, P> ProductService<R, P>
where
    R: ProductRepository,
    P: ProductPublisher + 'static,
{
    /// Create a service with default messages and circuit settings.
    pub fn new(repository: R, publisher: P) -> Self {
        Self {
            repository: Arc::new(repository),
            publisher: Arc::new(publisher),
            messages: Arc::new(Messages::default()),
            circuits: Arc::new(OperationCircuits::new(&CircuitSettings::default())),
        }
    }

    /// Replace the operator-facing message strings.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    /// Replace the per-operation circuit settings. Existing breaker state is
    /// discarded; call during wiring, not at runtime.
    pub fn with_circuits(mut self, settings: CircuitSettings) -> Self {
        self.circuits = Arc::new(OperationCircuits::new(&settings));
        self
    }

    /// List every stored product.
    ///
    /// Degraded mode returns a single sentinel entry whose `product_name` is
    /// the error message; callers must treat such a list as suspect.
    #[instrument(skip(self))]
    pub async fn find_all_products(&self) -> Vec<Product> {
        self.circuits
            .find_all
            .call(
                async move {
                    let stream = self.repository.find_all().await?;
                    let products: Vec<Product> = stream.try_collect().await?;
                    if products.is_empty() {
                        return Err(ProductError::NotFoundAll(
                            self.messages.not_found_all.clone(),
                        ));
                    }
                    Ok(products)
                },
                |err| vec![Product::sentinel(err)],
            )
            .await
    }

    /// Look up one product by business name.
    ///
    /// Degraded mode returns a synthetic product carrying the requested name
    /// and the error message in `product_type`.
    #[instrument(skip(self))]
    pub async fn find_by_product_name(&self, product_name: &str) -> Product {
        self.circuits
            .find_by_name
            .call(
                async move {
                    self.repository
                        .find_by_name(product_name)
                        .await?
                        .ok_or_else(|| ProductError::NotFound(self.messages.not_found.clone()))
                },
                |err| Product::fallback(product_name, err),
            )
            .await
    }

    /// Create a product with a unique name, then notify the topic.
    ///
    /// The existence check and the insert are separate store operations; the
    /// window between them is closed at the store by the unique name index.
    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn create_product(&self, input: CreateProduct) -> Product {
        let product_name = input.product_name.clone();
        self.circuits
            .create
            .call(
                async move {
                    input
                        .validate()
                        .map_err(|e| ProductError::Validation(e.to_string()))?;

                    let stream = self.repository.find_all().await?;
                    let existing: Vec<Product> = stream.try_collect().await?;
                    if existing
                        .iter()
                        .any(|p| p.product_name == input.product_name)
                    {
                        return Err(ProductError::AlreadyExists(
                            self.messages.already_exists.clone(),
                        ));
                    }

                    let created = self.repository.create(input).await?.ok_or_else(|| {
                        ProductError::NotFoundCreate(self.messages.not_found_create.clone())
                    })?;

                    self.notify_saved(&created);
                    Ok(created)
                },
                |err| Product::fallback(product_name.as_str(), err),
            )
            .await
    }

    /// Merge a partial payload into the product stored under `product_name`,
    /// persist the result, then notify the topic.
    ///
    /// The lookup goes through the wrapped read path: a missing name burns the
    /// find-by-name breaker and yields its synthetic product, whose missing id
    /// then fails the persist with the update message.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, input: UpdateProduct, product_name: &str) -> Product {
        self.circuits
            .update
            .call(
                async move {
                    let existing = self.find_by_product_name(product_name).await;

                    let merged = merge(&existing, &input);

                    let updated = self.repository.update(merged).await?.ok_or_else(|| {
                        ProductError::NotFoundUpdate(self.messages.not_found_update.clone())
                    })?;

                    self.notify_saved(&updated);
                    Ok::<_, ProductError>(updated)
                },
                |err| Product::fallback(product_name, err),
            )
            .await
    }

    /// Delete the product stored under `product_name`.
    ///
    /// Resolves the internal id first; the success envelope carries the
    /// configured confirmation message, never the deleted record. No
    /// notification is published for deletes.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_name: &str) -> Response {
        self.circuits
            .delete
            .call(
                async move {
                    let existing = self
                        .repository
                        .find_by_name(product_name)
                        .await?
                        .ok_or_else(|| ProductError::NotFound(self.messages.not_found.clone()))?;

                    let id = existing.id.ok_or_else(|| {
                        ProductError::NotFoundDelete(self.messages.not_found_delete.clone())
                    })?;

                    let deleted = self.repository.delete(id).await?;
                    if !deleted {
                        return Err(ProductError::NotFoundDelete(
                            self.messages.not_found_delete.clone(),
                        ));
                    }

                    Ok(Response::with_data(self.messages.product_deleted.clone()))
                },
                |err| Response::fallback(product_name, err),
            )
            .await
    }

    /// Fire-and-forget notification after a successful write.
    ///
    /// Publish failures are logged and swallowed; the write result is already
    /// decided when this runs.
    fn notify_saved(&self, product: &Product) {
        let publisher = Arc::clone(&self.publisher);
        let product = product.clone();
        tokio::spawn(async move {
            if let Err(e) = publisher.publish(&product).await {
                warn!(
                    error = %e,
                    product_name = %product.product_name,
                    "failed to publish saved product"
                );
            }
        });
    }
}

impl<R: ProductRepository, P: ProductPublisher> Clone for ProductService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            publisher: Arc::clone(&self.publisher),
            messages: Arc::clone(&self.messages),
            circuits: Arc::clone(&self.circuits),
        }
    }
}

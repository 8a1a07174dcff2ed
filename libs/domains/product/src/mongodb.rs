//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::{StreamExt, TryStreamExt};
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::{ProductRepository, ProductStream};

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a repository over the default `products` collection
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes.
    ///
    /// The unique index on `product_name` is the store-level backstop for the
    /// check-then-create race: a duplicate slipping past the service check
    /// fails the insert instead of persisting a second record.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "product_name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_product_name_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<ProductStream> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.map_err(ProductError::from).boxed())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let filter = doc! { "product_name": name };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Option<Product>> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        // Read back what the store holds; the id is always Some here
        let stored = match product.id {
            Some(id) => self.collection.find_one(Self::id_filter(id)).await?,
            None => None,
        };

        if let Some(ref created) = stored {
            tracing::info!(product_id = ?created.id, "Product created successfully");
        }
        Ok(stored)
    }

    #[instrument(skip(self, product), fields(product_name = %product.product_name))]
    async fn update(&self, product: Product) -> ProductResult<Option<Product>> {
        // Synthetic values carry no id and can never match a stored record
        let Some(id) = product.id else {
            return Ok(None);
        };

        let mut updated = product;
        updated.updated_at = Utc::now();

        let result = self
            .collection
            .replace_one(Self::id_filter(id), &updated)
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }
}

//! Product persistence on MongoDB

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

/// [`ProductRepository`] backed by a MongoDB collection
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Repository over the standard `products` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    /// Repository over a caller-chosen collection, used by tests to keep
    /// suites isolated from each other
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Ensure the unique index on the application-level `id` field.
    ///
    /// Lookups go through `id`, not the driver-managed `_id`, so `id` needs
    /// its own index.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Unique product id index ensured");
        Ok(())
    }

    /// Direct collection access for operations the trait does not cover
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.collection.find(doc! {}).await?.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Inserted product");
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: &Product) -> ProductResult<()> {
        self.collection
            .replace_one(doc! { "id": &product.id }, product)
            .await?;

        tracing::info!(product_id = %product.id, "Replaced product document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<()> {
        let result = self.collection.delete_many(doc! {}).await?;
        tracing::info!(deleted = result.deleted_count, "Cleared product collection");
        Ok(())
    }
}

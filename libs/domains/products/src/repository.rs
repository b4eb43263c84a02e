use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};

/// Persistence seam for products.
///
/// The service only sees this trait; MongoDB sits behind it today and tests
/// swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List every product in the store
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Find a product by ID; `None` when no record matches
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Insert a new product, assigning its identifier
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Replace the stored record matching `product.id` with `product`
    async fn replace(&self, product: &Product) -> ProductResult<()>;

    /// Delete a product by ID, reporting whether a record was removed
    async fn delete_by_id(&self, id: &str) -> ProductResult<bool>;

    /// Delete every product in the store
    async fn delete_all(&self) -> ProductResult<()>;
}

//! Orchestration layer between the HTTP surfaces and the repository

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing the store-facing operations
///
/// Most operations delegate 1:1 to the repository; update carries the
/// merge rule that pairs the stored identifier with the incoming fields.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Service over the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product by ID; `None` when no record matches
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    /// Create a new product; the store assigns the identifier
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        self.repository.insert(input).await
    }

    /// Replace a product's name and price.
    ///
    /// The stored identifier always survives; whatever id the caller put in
    /// the body never reaches the store. `None` when no record matches `id`.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: &str,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let Some(mut existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        existing.apply_update(input);
        self.repository.replace(&existing).await?;
        Ok(Some(existing))
    }

    /// Delete a product, reporting whether it existed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<bool> {
        self.repository.delete_by_id(id).await
    }

    /// Delete every product; idempotent
    #[instrument(skip(self))]
    pub async fn delete_all_products(&self) -> ProductResult<()> {
        self.repository.delete_all().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::repository::MockProductRepository;

    #[tokio::test]
    async fn test_update_product_keeps_stored_id() {
        let mut mock_repo = MockProductRepository::new();

        mock_repo.expect_find_by_id().returning(|id| {
            Ok(Some(Product {
                id: id.to_string(),
                name: "Big Latte".to_string(),
                price: 2.99,
            }))
        });

        // The persisted record must carry the stored id and the new fields
        mock_repo
            .expect_replace()
            .withf(|product| {
                product.id == "abc123" && product.name == "Jasmine Tea" && product.price == 0.99
            })
            .returning(|_| Ok(()));

        let service = ProductService::new(mock_repo);
        let updated = service
            .update_product(
                "abc123",
                UpdateProduct {
                    name: "Jasmine Tea".to_string(),
                    price: 0.99,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, "abc123");
        assert_eq!(updated.name, "Jasmine Tea");
        assert_eq!(updated.price, 0.99);
    }

    #[tokio::test]
    async fn test_update_product_missing_is_none() {
        let mut mock_repo = MockProductRepository::new();

        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        // No replace expectation: nothing must be persisted

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(
                "mock_id",
                UpdateProduct {
                    name: "Jasmine Tea".to_string(),
                    price: 0.99,
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_product_reports_absence() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete_by_id()
            .with(mockall::predicate::eq("aaa"))
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let deleted = service.delete_product("aaa").await.unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_get_product_propagates_store_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Err(ProductError::Database("connection reset".to_string())));

        let service = ProductService::new(mock_repo);
        let result = service.get_product("abc123").await;

        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}

//! Wires the product domain into this binary's state and startup hooks

use axum::Router;
use domain_products::{CreateProduct, MongoProductRepository, ProductService, handlers, routes};
use tracing::info;

use crate::state::AppState;

fn product_service(state: &AppState) -> ProductService<MongoProductRepository> {
    let repository = MongoProductRepository::new(&state.db);
    ProductService::new(repository)
}

/// Handler-based products router
pub fn router(state: &AppState) -> Router {
    handlers::router(product_service(state))
}

/// Functional-style products router
pub fn functional_router(state: &AppState) -> Router {
    routes::functional_router(product_service(state))
}

/// Ensure the product collection's indexes exist
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}

/// Reset the products collection and insert the demo catalog
pub async fn seed_demo_data(state: &AppState) -> eyre::Result<()> {
    let service = product_service(state);

    service.delete_all_products().await?;
    info!("Cleared products collection before seeding");

    let demo_products = [
        ("Big Latte", 2.99),
        ("Big Decaf", 2.49),
        ("Green Tea", 1.99),
    ];

    for (name, price) in demo_products {
        let product = service
            .create_product(CreateProduct {
                name: name.to_string(),
                price,
            })
            .await?;
        info!(product_id = %product.id, name = %product.name, "Seeded demo product");
    }

    Ok(())
}

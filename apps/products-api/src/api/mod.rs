//! Route assembly for the API surface

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// All routes the binary serves
///
/// The product handlers answer under two prefixes with identical semantics:
/// the handler-based surface at `/products` and the functional-style surface
/// at `/functional/products`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/functional/products", products::functional_router(state))
        .merge(health::router(state.clone()))
}

/// Ensure collection indexes exist before traffic arrives
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

/// Reset and seed the demo catalog
pub async fn seed_demo_data(state: &AppState) -> eyre::Result<()> {
    products::seed_demo_data(state).await
}

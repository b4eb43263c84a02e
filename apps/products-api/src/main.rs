//! Products API server binary

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    info!(database = %config.mongodb.database, "MongoDB ready");

    let state = AppState::new(config, mongo_client);

    api::init_indexes(&state).await?;

    // Reset the collection to the demo catalog when asked
    if state.config.seed_demo_data {
        api::seed_demo_data(&state).await?;
    }

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!(port = state.config.server.port, "Products API starting");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Closing MongoDB client");
            drop(state.mongo_client);
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API stopped");
    Ok(())
}

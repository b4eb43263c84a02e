//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`; this module
//! adds the readiness probe that round-trips MongoDB.

use axum::{extract::State, routing::get, Json, Router};
use axum_helpers::AppError;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    mongodb: &'static str,
    latency_ms: u64,
}

/// Readiness probe backed by a live MongoDB round trip
async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, AppError> {
    let health = database::mongodb::check_health_detailed(&state.mongo_client).await;

    if !health.healthy {
        warn!(details = ?health.message, "MongoDB readiness check failed");
        return Err(AppError::ServiceUnavailable(
            "MongoDB is not reachable".to_string(),
        ));
    }

    Ok(Json(ReadyResponse {
        status: "ready",
        mongodb: "up",
        latency_ms: health.response_time_ms,
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}

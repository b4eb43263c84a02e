use mongodb::Client;
use std::time::Instant;

/// Outcome of a MongoDB reachability probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// True when the probe round trip succeeded
    pub healthy: bool,
    /// Error text when the probe failed
    pub message: Option<String>,
    /// Probe duration in milliseconds
    pub response_time_ms: u64,
}

/// Cheap yes/no reachability probe
///
/// # Example
/// ```ignore
/// use database::mongodb::{check_health, connect};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let reachable = check_health(&client).await;
/// ```
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Reachability probe that also reports latency and the failure cause
///
/// # Example
/// ```ignore
/// use database::mongodb::{check_health_detailed, connect};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     warn!("MongoDB unhealthy: {:?}", status.message);
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let message = client.list_database_names().await.err().map(|e| e.to_string());
    let response_time_ms = start.elapsed().as_millis() as u64;

    HealthStatus {
        healthy: message.is_none(),
        message,
        response_time_ms,
    }
}

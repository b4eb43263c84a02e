use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Open a client against `url` using the default pool settings
///
/// # Example
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("catalog");
/// ```
pub async fn connect(url: &str) -> Result<Client, MongoError> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Open a client with the pool and timeout settings from a [`MongoConfig`]
///
/// The connection is verified with a lightweight round trip before the
/// client is handed back, so a bad URL fails here rather than on first use.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
/// let client = connect_from_config(&config).await?;
/// ```
///
/// With the `config` feature, settings can come from the environment:
/// ```ignore
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(url = %config.url, "Opening MongoDB connection");

    let client = Client::with_options(client_options(config).await?)?;

    // Round trip before returning so errors surface at startup
    client
        .list_database_names()
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("MongoDB connection established");
    Ok(client)
}

async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Like [`connect`], but keep trying with exponential backoff
///
/// Covers the window where the app comes up before its database does.
///
/// # Example
/// ```ignore
/// use database::common::RetryConfig;
/// use database::mongodb::connect_with_retry;
///
/// // None falls back to the default policy: 3 retries from 100ms
/// let client = connect_with_retry("mongodb://localhost:27017", None).await?;
///
/// let policy = RetryConfig::new().with_max_retries(5).with_initial_delay(500);
/// let client = connect_with_retry("mongodb://localhost:27017", Some(policy)).await?;
/// ```
pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    let url = url.to_string();

    retry_with_backoff(|| connect(&url), retry_config.unwrap_or_default()).await
}

/// Like [`connect_from_config`], but keep trying with exponential backoff
///
/// # Example
/// ```ignore
/// use database::common::RetryConfig;
/// use database::mongodb::{MongoConfig, connect_from_config_with_retry};
///
/// let config = MongoConfig::from_env()?;
/// let policy = RetryConfig::new().with_max_retries(5);
/// let client = connect_from_config_with_retry(&config, Some(policy)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    let config = config.clone();

    retry_with_backoff(
        || connect_from_config(&config),
        retry_config.unwrap_or_default(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_url() -> String {
        std::env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_reaches_local_instance() {
        assert!(connect(&local_url()).await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_applies_config() {
        let config = MongoConfig::with_database(local_url(), "connector_test");
        assert!(connect_from_config(&config).await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_with_retry_policy() {
        let policy = RetryConfig::new().with_max_retries(2).with_initial_delay(50);
        assert!(connect_with_retry(&local_url(), Some(policy)).await.is_ok());
    }
}

//! Connection management for the MongoDB document store.
//!
//! Applications get a ready `Client` out of this crate and nothing else:
//! pool settings, startup retry, and reachability probes all live here so
//! the services built on top never touch driver setup.
//!
//! # Features
//!
//! - `mongodb` (default) enables the MongoDB connector
//! - `config` adds `core_config::FromEnv` loading for `MongoConfig`
//! - `all` turns everything on
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let collection = client.database("catalog").collection::<Document>("products");
//! ```
//!
//! Environment-driven setup with startup retry (needs the `config` feature):
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let retry = RetryConfig::new().with_max_retries(5);
//! let client = connect_from_config_with_retry(&config, Some(retry)).await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

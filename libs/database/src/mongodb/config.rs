#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Connection settings for a MongoDB deployment
///
/// Build one in code, or pull it from the environment when the `config`
/// feature is enabled.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017");
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
///
/// // With the `config` feature:
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, `mongodb://[user:pass@]host[:port][/db][?options]`
    pub url: String,

    /// Name of the database the app works against
    pub database: String,

    /// Name reported to the server, shows up in its connection logs
    pub app_name: Option<String>,

    /// Upper bound on pooled connections
    pub max_pool_size: u32,

    /// Connections the pool keeps warm
    pub min_pool_size: u32,

    /// Seconds to wait for a single connection to open
    pub connect_timeout_secs: u64,

    /// Seconds to wait for a suitable server before giving up
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Settings for `url` with everything else at its default
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Settings for `url` targeting a named database
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
    /// ```
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Attach the name the server should log for this client
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Environment variables read by `from_env`:
///
/// | Variable | Default |
/// |----------|---------|
/// | `MONGODB_URL` (or `MONGO_URL`) | required |
/// | `MONGODB_DATABASE` (or `MONGO_DATABASE`) | required |
/// | `MONGODB_APP_NAME` | unset |
/// | `MONGODB_MAX_POOL_SIZE` | 100 |
/// | `MONGODB_MIN_POOL_SIZE` | 5 |
/// | `MONGODB_CONNECT_TIMEOUT_SECS` | 10 |
/// | `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` | 30 |
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: first_of("MONGODB_URL", "MONGO_URL")?,
            database: first_of("MONGODB_DATABASE", "MONGO_DATABASE")?,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: parse_env_or("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: parse_env_or("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: parse_env_or("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: parse_env_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}

/// Read `primary`, falling back to the short-form `fallback` variable
#[cfg(feature = "config")]
fn first_of(primary: &str, fallback: &str) -> Result<String, ConfigError> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| ConfigError::MissingEnvVar(format!("{} or {}", primary, fallback)))
}

#[cfg(feature = "config")]
fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_pool_defaults() {
        let config = MongoConfig::new("mongodb://db.internal:27017");
        assert_eq!(config.url, "mongodb://db.internal:27017");
        assert_eq!(config.database, "default");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_with_database_sets_name() {
        let config = MongoConfig::with_database("mongodb://db.internal:27017", "inventory");
        assert_eq!(config.database, "inventory");
    }

    #[test]
    fn test_with_app_name_is_reported() {
        let config = MongoConfig::new("mongodb://db.internal:27017").with_app_name("products-api");
        assert_eq!(config.app_name.as_deref(), Some("products-api"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_reads_primary_vars() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://primary:27017")),
                ("MONGODB_DATABASE", Some("inventory")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://primary:27017");
                assert_eq!(config.database, "inventory");
                assert_eq!(config.app_name, None);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_accepts_short_form_vars() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://short:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("shortdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://short:27017");
                assert_eq!(config.database, "shortdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_requires_a_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("inventory")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_rejects_unparseable_pool_size() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://primary:27017")),
                ("MONGODB_DATABASE", Some("inventory")),
                ("MONGODB_MAX_POOL_SIZE", Some("not-a-number")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }
}

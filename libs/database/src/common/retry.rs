use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for connection attempts
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// How many retries follow the initial attempt
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,

    /// Ceiling the growing delay never exceeds, in milliseconds
    pub max_delay_ms: u64,

    /// Growth factor applied to the delay after each failure
    pub backoff_multiplier: f64,

    /// Randomize each delay downward to spread out reconnect storms
    pub use_jitter: bool,
}

impl RetryConfig {
    /// Policy with the default settings: 3 retries, starting at 100ms and
    /// doubling up to 5s, with jitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the retry count
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the delay before the first retry
    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    /// Override the delay ceiling
    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    /// Make every delay exact instead of randomized
    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Run an async operation, retrying failures with exponential backoff
///
/// The operation runs once right away. Each failure sleeps for the current
/// delay and then grows it by the multiplier, capped at the ceiling. Once all
/// retries are used up the last error is returned as-is.
///
/// # Example
/// ```ignore
/// use database::common::retry::{retry_with_backoff, RetryConfig};
///
/// let policy = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(|| database::mongodb::connect(&url), policy).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay_ms = config.initial_delay_ms;
    let mut remaining = config.max_retries;

    loop {
        match operation().await {
            Ok(value) => {
                if remaining < config.max_retries {
                    debug!(
                        retries = config.max_retries - remaining,
                        "Operation recovered"
                    );
                }
                return Ok(value);
            }
            Err(e) => {
                if remaining == 0 {
                    warn!(
                        attempts = config.max_retries + 1,
                        "Giving up on operation: {}", e
                    );
                    return Err(e);
                }
                remaining -= 1;

                let sleep_ms = if config.use_jitter {
                    apply_jitter(delay_ms)
                } else {
                    delay_ms
                };

                debug!(
                    attempt = config.max_retries - remaining,
                    retry_in_ms = sleep_ms,
                    "Operation failed: {}", e
                );

                tokio::time::sleep(Duration::from_millis(sleep_ms)).await;
                delay_ms = scaled_delay(delay_ms, &config);
            }
        }
    }
}

fn scaled_delay(delay_ms: u64, config: &RetryConfig) -> u64 {
    ((delay_ms as f64 * config.backoff_multiplier) as u64).min(config.max_delay_ms)
}

/// Shrink a delay to somewhere in its upper half so that simultaneous
/// reconnects drift apart
fn apply_jitter(delay_ms: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    // Pseudo-random percentage in 50..100, seeded from the clock
    let percent = 50 + RandomState::new().hash_one(std::time::SystemTime::now()) % 50;

    delay_ms * percent / 100
}

/// Retry with the default policy
///
/// # Example
/// ```ignore
/// use database::common::retry::retry;
///
/// let client = retry(|| database::mongodb::connect(&url)).await?;
/// ```
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

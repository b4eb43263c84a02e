use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install the color-eyre panic and error report hooks.
///
/// Belongs at the very top of main(), ahead of anything fallible, so every
/// report carries source locations. Repeat calls are harmless.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Set up the global tracing subscriber for the given environment.
///
/// Production (`APP_ENV=production`) emits flattened JSON for log shippers;
/// development gets pretty human-oriented output. Either way a
/// `tracing_error::ErrorLayer` is attached so error reports carry span
/// traces, and `RUST_LOG` overrides the built-in filter.
///
/// Calling this twice is fine; the second call is a no-op, which matters for
/// test binaries.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(is_production));

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if result.is_ok() {
        info!(environment = ?environment, "Tracing initialized");
    } else {
        debug!("Tracing subscriber already set, keeping the existing one");
    }
}

fn default_filter(is_production: bool) -> EnvFilter {
    if is_production {
        EnvFilter::new("info,tower_http=info")
    } else {
        EnvFilter::new("debug")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_setup_does_not_panic() {
        init_tracing(&Environment::Development);
    }

    #[test]
    fn test_production_setup_does_not_panic() {
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_second_init_is_a_noop() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Development);
    }

    #[test]
    fn test_rust_log_override_is_accepted() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Development);
        });
    }
}

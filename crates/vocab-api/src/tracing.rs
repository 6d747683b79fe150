//! Tracing and logging configuration.
//!
//! Development gets pretty, human-readable output; production gets JSON
//! lines for log aggregation. `RUST_LOG` overrides the default filter in
//! both (e.g. `RUST_LOG=debug,sqlx=info`).

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,sqlx=warn";
const PRODUCTION_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Initialize tracing/logging based on the environment
pub fn init_tracing(env: &Environment) {
    let default_filter = if env.is_development() {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry();
    let initialized = if env.is_development() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(env_filter),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(env_filter),
            )
            .try_init()
    };

    match initialized {
        Ok(()) => tracing::info!(environment = ?env, "Tracing initialized"),
        // A subscriber was already installed (tests, embedding binaries).
        Err(e) => tracing::debug!(error = %e, "Tracing already initialized"),
    }
}

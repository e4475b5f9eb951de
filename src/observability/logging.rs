//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Select human-readable or JSON output
//! - Bridge spans to the OTLP exporter when telemetry is enabled
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured filter
//! - The OpenTelemetry layer is optional; without it spans stay local

use opentelemetry_sdk::trace::Tracer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter from `RUST_LOG`, falling back to the configured directives.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber was already set.
pub fn init_logging(
    config: &ObservabilityConfig,
    tracer: Option<Tracer>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let json = config.json_logs;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer)))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .try_init()
}

//! User Service
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::handlers ──▶ storage::TracedStore ──▶ Cassandra
//!                     (request id,      (POST /users,      (one client span         (prepared
//!                      request span)     GET /users/{id})    per call)                statements)
//!
//!     Cross-cutting: config (TOML + PORT), observability (logs + OTLP spans),
//!                    lifecycle (ordered startup, graceful shutdown)
//! ```

use clap::Parser;

use user_service::cli::Cli;
use user_service::config::resolve_config;
use user_service::lifecycle::{self, shutdown_signal, Shutdown};
use user_service::observability::{init_logging, Telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?.with_port_override(cli.port);

    let telemetry = Telemetry::init(&config.telemetry)?;
    init_logging(&config.observability, telemetry.tracer())?;

    tracing::info!("user-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        storage_backend = ?config.storage.backend,
        contact_points = ?config.storage.contact_points,
        datacenter = %config.storage.local_datacenter,
        keyspace = %config.storage.keyspace,
        telemetry_enabled = telemetry.is_enabled(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on(shutdown_signal());

    let result = lifecycle::run(&config, shutdown.subscribe()).await;

    // The SDK blocks while flushing; keep that off the async workers.
    tokio::task::spawn_blocking(move || telemetry.shutdown()).await?;

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}

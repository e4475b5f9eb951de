//! Startup orchestration.
//!
//! # Responsibilities
//! - Connect to the row store
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: a storage connection failure is fatal, no retry
//! - The listener binds last, so a failed start never opens the port

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::storage::{self, StoreError, StoreResult, UserStore};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to connect to storage: {0}")]
    Storage(#[source] StoreError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Connect the configured store, then serve until shutdown.
pub async fn run(
    config: &ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    launch(config, storage::connect(&config.storage), shutdown).await
}

/// Await `connect`, then bind and serve with the resulting store.
pub async fn launch<F>(
    config: &ServiceConfig,
    connect: F,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError>
where
    F: Future<Output = StoreResult<Arc<dyn UserStore>>>,
{
    let store = connect.await.map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to storage");
        StartupError::Storage(e)
    })?;

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Server is running");
    }

    HttpServer::new(store)
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)
}

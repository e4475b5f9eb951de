//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → Arc<dyn UserStore> (router state)
//!     → traced.rs (one client span per call)
//!     → cassandra.rs (prepared INSERT / SELECT on the cluster)
//!       or memory.rs (in-process map)
//! ```
//!
//! # Design Decisions
//! - The store is built once at startup and injected, never a global
//! - Tracing is a decorator applied at construction, not hidden in the driver
//! - Duplicate ids overwrite: the row store's insert is an upsert

pub mod cassandra;
pub mod memory;
pub mod model;
pub mod store;
pub mod traced;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};

pub use cassandra::CassandraStore;
pub use memory::MemoryStore;
pub use model::User;
pub use store::{StoreError, StoreResult, UserStore};
pub use traced::TracedStore;

/// Build the configured store, wrapped in the tracing decorator.
pub async fn connect(config: &StorageConfig) -> StoreResult<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match config.backend {
        StorageBackend::Cassandra => {
            let inner = CassandraStore::connect(config).await?;
            Arc::new(TracedStore::for_config(inner, config))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; rows are lost on exit");
            Arc::new(TracedStore::for_config(MemoryStore::new(), config))
        }
    };
    Ok(store)
}

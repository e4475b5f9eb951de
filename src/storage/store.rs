//! Store abstraction and error definitions.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::storage::model::User;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Session could not be established.
    #[error("Connection error: {0}")]
    Connect(String),

    /// Statement could not be prepared.
    #[error("Prepare error: {0}")]
    Prepare(String),

    /// A value could not be bound to a statement parameter.
    #[error("Bind error: {0}")]
    Bind(String),

    /// Statement execution failed.
    #[error("Query error: {0}")]
    Query(String),

    /// Result rows did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Backing store is not reachable.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Point-access store for `users` rows.
///
/// Implementations are shared across request handlers, so they must be
/// usable concurrently through `&self`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Write a row. An existing row with the same id is overwritten.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Look up a row by id. `Ok(None)` when no row matches.
    async fn find(&self, id: &str) -> StoreResult<Option<User>>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        (**self).insert(user).await
    }

    async fn find(&self, id: &str) -> StoreResult<Option<User>> {
        (**self).find(id).await
    }
}

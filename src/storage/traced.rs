//! Span-emitting store decorator.
//!
//! Wraps any [`UserStore`] so that every call runs inside one client span.
//! Applied explicitly where the store is built:
//!
//! ```rust,ignore
//! let store = TracedStore::new(CassandraStore::connect(&config).await?, attrs);
//! ```

use async_trait::async_trait;
use tracing::Instrument;

use crate::config::StorageConfig;
use crate::observability::spans::{
    db_span, record_db_error, record_returned_rows, DbOperation, DbSpanAttributes,
};
use crate::storage::cassandra::{INSERT_USER, SELECT_USER};
use crate::storage::model::User;
use crate::storage::store::{StoreResult, UserStore};

pub struct TracedStore<S> {
    inner: S,
    attrs: DbSpanAttributes,
}

impl<S: UserStore> TracedStore<S> {
    pub fn new(inner: S, attrs: DbSpanAttributes) -> Self {
        Self { inner, attrs }
    }

    /// Decorate a store with the span attributes derived from its config.
    pub fn for_config(inner: S, config: &StorageConfig) -> Self {
        Self::new(
            inner,
            DbSpanAttributes {
                system: "cassandra".to_string(),
                namespace: config.keyspace.clone(),
                collection: "users".to_string(),
                server_address: config.contact_points.join(","),
            },
        )
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: UserStore> UserStore for TracedStore<S> {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        let span = db_span(&self.attrs, DbOperation::Insert, INSERT_USER);
        let result = self.inner.insert(user).instrument(span.clone()).await;
        if let Err(e) = &result {
            record_db_error(&span, e);
        }
        result
    }

    async fn find(&self, id: &str) -> StoreResult<Option<User>> {
        let span = db_span(&self.attrs, DbOperation::Select, SELECT_USER);
        let result = self.inner.find(id).instrument(span.clone()).await;
        match &result {
            Ok(row) => record_returned_rows(&span, usize::from(row.is_some())),
            Err(e) => record_db_error(&span, e),
        }
        result
    }
}

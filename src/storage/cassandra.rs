//! Cassandra / ScyllaDB store.
//!
//! # Responsibilities
//! - Open one pooled session against the configured contact points
//! - Route requests to the configured local data-center
//! - Prepare the insert and point-lookup statements once
//!
//! # Design Decisions
//! - No reconnection, timeout or retry policy beyond the driver defaults
//! - Session failures at startup are returned to the caller, which treats them as fatal

use async_trait::async_trait;
use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::policies::load_balancing::DefaultPolicy;
use scylla::statement::prepared::PreparedStatement;
use std::time::Duration;

use crate::config::StorageConfig;
use crate::storage::model::User;
use crate::storage::store::{StoreError, StoreResult, UserStore};

pub const INSERT_USER: &str = "INSERT INTO users (id, name) VALUES (?, ?)";
pub const SELECT_USER: &str = "SELECT id, name FROM users WHERE id = ?";

/// Store backed by a Cassandra-compatible cluster.
pub struct CassandraStore {
    session: Session,
    insert: PreparedStatement,
    select: PreparedStatement,
    config: StorageConfig,
}

impl CassandraStore {
    /// Connect to the cluster and prepare statements.
    ///
    /// # Returns
    /// A ready store, or the first error met while connecting or preparing
    pub async fn connect(config: &StorageConfig) -> StoreResult<Self> {
        let policy = DefaultPolicy::builder()
            .prefer_datacenter(config.local_datacenter.clone())
            .build();
        let profile = ExecutionProfile::builder()
            .load_balancing_policy(policy)
            .build()
            .into_handle();

        let session = SessionBuilder::new()
            .known_nodes(&config.contact_points)
            .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
            .default_execution_profile_handle(profile)
            .use_keyspace(config.keyspace.as_str(), false)
            .build()
            .await
            .map_err(|e| {
                StoreError::Connect(format!(
                    "{} ({}): {}",
                    config.contact_points.join(","),
                    config.local_datacenter,
                    e
                ))
            })?;

        let insert = session
            .prepare(INSERT_USER)
            .await
            .map_err(|e| StoreError::Prepare(format!("{}: {}", INSERT_USER, e)))?;
        let select = session
            .prepare(SELECT_USER)
            .await
            .map_err(|e| StoreError::Prepare(format!("{}: {}", SELECT_USER, e)))?;

        tracing::info!(
            contact_points = ?config.contact_points,
            datacenter = %config.local_datacenter,
            keyspace = %config.keyspace,
            "Connected to row store"
        );

        Ok(Self {
            session,
            insert,
            select,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl UserStore for CassandraStore {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        self.session
            .execute_unpaged(&self.insert, (user.id.as_str(), user.name.as_deref()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    async fn find(&self, id: &str) -> StoreResult<Option<User>> {
        let result = self
            .session
            .execute_unpaged(&self.select, (id,))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows = result
            .into_rows_result()
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        let row = rows
            .maybe_first_row::<(String, Option<String>)>()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(row.map(|(id, name)| User { id, name }))
    }
}

impl std::fmt::Debug for CassandraStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CassandraStore")
            .field("contact_points", &self.config.contact_points)
            .field("datacenter", &self.config.local_datacenter)
            .field("keyspace", &self.config.keyspace)
            .finish()
    }
}

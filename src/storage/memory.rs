//! In-process store.
//!
//! Same contract as the cluster-backed store: last write wins, point lookup
//! by id. Can be taken offline to stand in for a disconnected cluster.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::storage::model::User;
use crate::storage::store::{StoreError, StoreResult, UserStore};

#[derive(Debug)]
pub struct MemoryStore {
    rows: DashMap<String, Option<String>>,
    online: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            online: AtomicBool::new(true),
        }
    }

    /// Connect or disconnect the store. While offline every call fails.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        tracing::debug!(online, "Memory store availability changed");
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        self.check_online()?;
        self.rows.insert(user.id.clone(), user.name.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> StoreResult<Option<User>> {
        self.check_online()?;
        Ok(self
            .rows
            .get(id)
            .map(|name| User {
                id: id.to_string(),
                name: name.value().clone(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        store.insert(&User::new("1", "Ada")).await.unwrap();
        assert_eq!(store.find("1").await.unwrap(), Some(User::new("1", "Ada")));
        assert_eq!(store.find("2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.insert(&User::new("1", "Ada")).await.unwrap();
        store.insert(&User::new("1", "Grace")).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find("1").await.unwrap().unwrap().name.as_deref(),
            Some("Grace")
        );
    }

    #[tokio::test]
    async fn test_null_name_round_trips() {
        let store = MemoryStore::new();
        store.insert(&User::unnamed("1")).await.unwrap();
        assert_eq!(store.find("1").await.unwrap(), Some(User::unnamed("1")));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.insert(&User::new("1", "Ada")).await.unwrap();
        store.set_online(false);

        assert!(matches!(
            store.insert(&User::new("2", "Bob")).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.find("1").await, Err(StoreError::Unavailable(_))));

        store.set_online(true);
        assert!(store.find("1").await.unwrap().is_some());
        assert!(store.find("2").await.unwrap().is_none());
    }
}

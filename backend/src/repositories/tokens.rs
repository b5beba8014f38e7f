//! Refresh-token store
//!
//! One active refresh-token record per user, kept in a document store
//! keyed by user id. The store itself does not enforce uniqueness; the
//! auth service clears any stale record before creating a new one.
//! Concurrent `replace` calls for the same user race and the last write
//! wins, leaving the loser's pair unusable for refresh.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Persisted refresh-token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique id of the refresh token; the paired access token references it.
    pub token_id: String,
    pub user_id: String,
    /// The signed refresh token string.
    pub token: String,
    pub expires_at: i64,
    /// Reserved for single-use detection; written but not read back yet.
    pub used: bool,
}

/// Token store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("token record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Port for refresh-token persistence.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Insert a record for `record.user_id`.
    async fn create(&self, record: &RefreshTokenRecord) -> Result<(), StoreError>;

    /// Replace the user's record: delete, then create. The two steps form
    /// one logical operation; if the delete fails the create is not
    /// attempted.
    async fn replace(&self, user_id: &str, record: &RefreshTokenRecord) -> Result<(), StoreError>;

    /// Delete the user's record. Deleting a missing record is not an error.
    async fn delete(&self, user_id: &str) -> Result<(), StoreError>;
}

/// Redis-backed token store.
///
/// Each user's record is a JSON document under `auth:refresh:<user_id>`.
/// The connection manager is internally synchronized and cheap to clone.
#[derive(Clone)]
pub struct RedisTokenStore {
    conn: ConnectionManager,
}

impl RedisTokenStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(user_id: &str) -> String {
        format!("auth:refresh:{}", user_id)
    }
}

#[async_trait]
impl RefreshTokenStore for RedisTokenStore {
    async fn create(&self, record: &RefreshTokenRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_string(record)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set(Self::key(&record.user_id), payload).await?;
        Ok(())
    }

    async fn replace(&self, user_id: &str, record: &RefreshTokenRecord) -> Result<(), StoreError> {
        self.delete(user_id).await?;
        self.create(record).await
    }

    async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        // DEL of a missing key is a no-op
        let _: i64 = conn.del(Self::key(user_id)).await?;
        Ok(())
    }
}

/// In-memory token store, used by unit tests and local development
/// without a running document store.
#[derive(Default)]
pub struct InMemoryTokenStore {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record currently held for a user, if any.
    pub fn get(&self, user_id: &str) -> Option<RefreshTokenRecord> {
        self.records.read().unwrap().get(user_id).cloned()
    }

    /// Number of records across all users.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryTokenStore {
    async fn create(&self, record: &RefreshTokenRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .unwrap()
            .insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn replace(&self, user_id: &str, record: &RefreshTokenRecord) -> Result<(), StoreError> {
        self.delete(user_id).await?;
        self.create(record).await
    }

    async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        self.records.write().unwrap().remove(user_id);
        Ok(())
    }
}

//! Password hashing using bcrypt
//!
//! Provides salted one-way hashing and constant-time verification.
//! bcrypt is intentionally CPU-expensive; async callers go through the
//! `spawn_blocking` wrappers so the runtime is never stalled.

use anyhow::Result;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("invalid password hash: {}", e))
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("task join error: {}", e))?
    }
}

//! User service
//!
//! Business layer for user management. Owns input validation and password
//! hashing; the repository only ever sees finished hashes.

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use storefront_shared::models::{NewUser, UpdateUser, User};
use storefront_shared::validation;
use uuid::Uuid;

/// User service
pub struct UserService;

impl UserService {
    /// Create a new user.
    ///
    /// Hashing runs on the blocking thread pool; bcrypt is CPU-expensive.
    pub async fn create(pool: &PgPool, new_user: NewUser) -> Result<User, ApiError> {
        validation::check(&new_user)?;

        let password_hash = PasswordService::hash_async(new_user.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &new_user, &password_hash).await?;
        Ok(user)
    }

    /// Paginated user listing by last-seen id.
    pub async fn list(
        pool: &PgPool,
        last_seen_id: Uuid,
        limit: i64,
    ) -> Result<Vec<User>, ApiError> {
        Ok(UserRepository::list(pool, last_seen_id, limit).await?)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<User, ApiError> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))
    }

    /// Apply a partial update; a changed password is re-hashed first.
    pub async fn update(pool: &PgPool, id: Uuid, updates: UpdateUser) -> Result<User, ApiError> {
        validation::check(&updates)?;

        let password_hash = match &updates.password {
            Some(password) => Some(
                PasswordService::hash_async(password.clone())
                    .await
                    .map_err(ApiError::Internal)?,
            ),
            None => None,
        };

        UserRepository::update(pool, id, &updates, password_hash)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        Ok(UserRepository::delete(pool, id).await?)
    }
}

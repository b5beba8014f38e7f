//! User repository for database operations

use sqlx::PgPool;
use storefront_shared::models::{NewUser, UpdateUser, User};
use uuid::Uuid;

/// User row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            username: record.username,
            first_name: record.first_name,
            last_name: record.last_name,
            password_hash: record.password_hash,
            email: record.email,
            roles: record.roles,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, username, first_name, last_name, password_hash, email, roles, created_at, updated_at";

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user from validated input and a pre-computed password hash.
    ///
    /// A username or email collision surfaces as the driver's unique
    /// violation, which the error layer maps to a conflict.
    pub async fn create(
        pool: &PgPool,
        new_user: &NewUser,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (id, username, first_name, last_name, password_hash, email, roles)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(password_hash)
        .bind(&new_user.email)
        .bind(&new_user.roles)
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    /// List users paginated by last-seen id, newest ids first.
    pub async fn list(
        pool: &PgPool,
        last_seen_id: Uuid,
        limit: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id <= $1
            ORDER BY id DESC
            LIMIT $2
            "#
        ))
        .bind(last_seen_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Find a user by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Find a user by username (the sign-in lookup key)
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Apply a partial update; absent fields keep their stored values.
    /// `password_hash` is pre-computed by the caller when the password changes.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: &UpdateUser,
        password_hash: Option<String>,
    ) -> Result<Option<User>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                password_hash = COALESCE($6, password_hash),
                roles = COALESCE($7, roles),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&updates.username)
        .bind(&updates.first_name)
        .bind(&updates.last_name)
        .bind(&updates.email)
        .bind(password_hash)
        .bind(&updates.roles)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Delete a user by id. Deleting a missing user is not an error.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

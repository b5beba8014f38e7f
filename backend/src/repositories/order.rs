//! Order repository for database operations

use sqlx::PgPool;
use storefront_shared::models::{NewOrder, Order, UpdateOrder};
use uuid::Uuid;

/// Order row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Order {
            id: record.id,
            user_id: record.user_id,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const ORDER_COLUMNS: &str = "id, user_id, status, created_at, updated_at";

/// Order repository for database operations
pub struct OrderRepository;

impl OrderRepository {
    pub async fn create(pool: &PgPool, new_order: &NewOrder) -> Result<Order, sqlx::Error> {
        let record = sqlx::query_as::<_, OrderRecord>(&format!(
            r#"
            INSERT INTO orders (id, user_id, status)
            VALUES ($1, $2, $3)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_order.user_id)
        .bind(&new_order.status)
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    /// List orders paginated by last-seen id, newest ids first.
    pub async fn list(
        pool: &PgPool,
        last_seen_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let records = sqlx::query_as::<_, OrderRecord>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
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

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        let record = sqlx::query_as::<_, OrderRecord>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// All orders belonging to one user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Order>, sqlx::Error> {
        let records = sqlx::query_as::<_, OrderRecord>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: &UpdateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let record = sqlx::query_as::<_, OrderRecord>(&format!(
            r#"
            UPDATE orders SET
                status = COALESCE($2, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&updates.status)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Delete an order by id. Deleting a missing order is not an error.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Delete all orders belonging to one user.
    pub async fn delete_by_user(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM orders WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

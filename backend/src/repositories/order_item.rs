//! Order-item repository for database operations

use sqlx::PgPool;
use storefront_shared::models::{NewOrderItem, OrderItem, UpdateOrderItem};
use uuid::Uuid;

/// Order-item row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItemRecord {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<OrderItemRecord> for OrderItem {
    fn from(record: OrderItemRecord) -> Self {
        OrderItem {
            id: record.id,
            order_id: record.order_id,
            product_id: record.product_id,
            quantity: record.quantity,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, created_at, updated_at";

/// Order-item repository for database operations
pub struct OrderItemRepository;

impl OrderItemRepository {
    pub async fn create(
        pool: &PgPool,
        new_order_item: &NewOrderItem,
    ) -> Result<OrderItem, sqlx::Error> {
        let record = sqlx::query_as::<_, OrderItemRecord>(&format!(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING {ORDER_ITEM_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_order_item.order_id)
        .bind(new_order_item.product_id)
        .bind(new_order_item.quantity)
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<OrderItem>, sqlx::Error> {
        let record = sqlx::query_as::<_, OrderItemRecord>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// All items belonging to one order.
    pub async fn list_by_order(
        pool: &PgPool,
        order_id: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let records = sqlx::query_as::<_, OrderItemRecord>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY created_at"
        ))
        .bind(order_id)
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: &UpdateOrderItem,
    ) -> Result<Option<OrderItem>, sqlx::Error> {
        let record = sqlx::query_as::<_, OrderItemRecord>(&format!(
            r#"
            UPDATE order_items SET
                quantity = COALESCE($2, quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(updates.quantity)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Delete an order item by id. Deleting a missing item is not an error.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Delete all items belonging to one order.
    pub async fn delete_by_order(pool: &PgPool, order_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

//! Product repository for database operations

use sqlx::PgPool;
use storefront_shared::models::{NewProduct, Product, UpdateProduct};
use uuid::Uuid;

/// Product row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id,
            title: record.title,
            description: record.description,
            price: record.price,
            stock: record.stock,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, title, description, price, stock, created_at, updated_at";

/// Product repository for database operations
pub struct ProductRepository;

impl ProductRepository {
    pub async fn create(pool: &PgPool, new_product: &NewProduct) -> Result<Product, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            INSERT INTO products (id, title, description, price, stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_product.title)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(new_product.stock)
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    /// List products paginated by last-seen id, newest ids first.
    pub async fn list(
        pool: &PgPool,
        last_seen_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
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

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            UPDATE products SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock = COALESCE($5, stock),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&updates.title)
        .bind(&updates.description)
        .bind(updates.price)
        .bind(updates.stock)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Delete a product by id. Deleting a missing product is not an error.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

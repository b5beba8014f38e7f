//! Product service

use crate::error::ApiError;
use crate::repositories::ProductRepository;
use sqlx::PgPool;
use storefront_shared::models::{NewProduct, Product, UpdateProduct};
use storefront_shared::validation;
use uuid::Uuid;

/// Product service
pub struct ProductService;

impl ProductService {
    pub async fn create(pool: &PgPool, new_product: NewProduct) -> Result<Product, ApiError> {
        validation::check(&new_product)?;
        Ok(ProductRepository::create(pool, &new_product).await?)
    }

    pub async fn list(
        pool: &PgPool,
        last_seen_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Product>, ApiError> {
        Ok(ProductRepository::list(pool, last_seen_id, limit).await?)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Product, ApiError> {
        ProductRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("product {}", id)))
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateProduct,
    ) -> Result<Product, ApiError> {
        validation::check(&updates)?;
        ProductRepository::update(pool, id, &updates)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("product {}", id)))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        Ok(ProductRepository::delete(pool, id).await?)
    }
}

//! Order service

use crate::error::ApiError;
use crate::repositories::OrderRepository;
use sqlx::PgPool;
use storefront_shared::models::{NewOrder, Order, UpdateOrder};
use storefront_shared::validation;
use uuid::Uuid;

/// Order service
pub struct OrderService;

impl OrderService {
    pub async fn create(pool: &PgPool, new_order: NewOrder) -> Result<Order, ApiError> {
        validation::check(&new_order)?;
        Ok(OrderRepository::create(pool, &new_order).await?)
    }

    pub async fn list(
        pool: &PgPool,
        last_seen_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Order>, ApiError> {
        Ok(OrderRepository::list(pool, last_seen_id, limit).await?)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Order, ApiError> {
        OrderRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("order {}", id)))
    }

    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Order>, ApiError> {
        Ok(OrderRepository::list_by_user(pool, user_id).await?)
    }

    pub async fn update(pool: &PgPool, id: Uuid, updates: UpdateOrder) -> Result<Order, ApiError> {
        validation::check(&updates)?;
        OrderRepository::update(pool, id, &updates)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("order {}", id)))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        Ok(OrderRepository::delete(pool, id).await?)
    }

    pub async fn delete_by_user(pool: &PgPool, user_id: Uuid) -> Result<(), ApiError> {
        Ok(OrderRepository::delete_by_user(pool, user_id).await?)
    }
}

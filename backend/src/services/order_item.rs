//! Order-item service

use crate::error::ApiError;
use crate::repositories::OrderItemRepository;
use sqlx::PgPool;
use storefront_shared::models::{NewOrderItem, OrderItem, UpdateOrderItem};
use storefront_shared::validation;
use uuid::Uuid;

/// Order-item service
pub struct OrderItemService;

impl OrderItemService {
    pub async fn create(pool: &PgPool, new_item: NewOrderItem) -> Result<OrderItem, ApiError> {
        validation::check(&new_item)?;
        Ok(OrderItemRepository::create(pool, &new_item).await?)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<OrderItem, ApiError> {
        OrderItemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("order item {}", id)))
    }

    pub async fn list_by_order(pool: &PgPool, order_id: Uuid) -> Result<Vec<OrderItem>, ApiError> {
        Ok(OrderItemRepository::list_by_order(pool, order_id).await?)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateOrderItem,
    ) -> Result<OrderItem, ApiError> {
        validation::check(&updates)?;
        OrderItemRepository::update(pool, id, &updates)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("order item {}", id)))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        Ok(OrderItemRepository::delete(pool, id).await?)
    }

    pub async fn delete_by_order(pool: &PgPool, order_id: Uuid) -> Result<(), ApiError> {
        Ok(OrderItemRepository::delete_by_order(pool, order_id).await?)
    }
}

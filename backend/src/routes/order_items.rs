//! Order-item routes
//!
//! The whole group requires an authenticated caller with the USER role.

use crate::auth::{authenticate, authorize};
use crate::error::ApiResult;
use crate::services::OrderItemService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use storefront_shared::models::{NewOrderItem, OrderItem, UpdateOrderItem, USER_ROLE};
use uuid::Uuid;

/// Create order-item routes
pub fn order_item_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_order_item))
        .route(
            "/:id",
            get(get_order_item)
                .patch(update_order_item)
                .delete(delete_order_item),
        )
        .route(
            "/orders/:order_id",
            get(list_order_items).delete(delete_order_items),
        )
        .route_layer(middleware::from_fn(|req, next| {
            authorize(USER_ROLE, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

/// POST /order_items
async fn create_order_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewOrderItem>,
) -> ApiResult<(StatusCode, Json<OrderItem>)> {
    let item = OrderItemService::create(state.db(), new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /order_items/{id}
async fn get_order_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderItem>> {
    let item = OrderItemService::get(state.db(), id).await?;
    Ok(Json(item))
}

/// GET /order_items/orders/{order_id} - all items of one order
async fn list_order_items(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<Json<Vec<OrderItem>>> {
    let items = OrderItemService::list_by_order(state.db(), order_id).await?;
    Ok(Json(items))
}

/// PATCH /order_items/{id}
async fn update_order_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<UpdateOrderItem>,
) -> ApiResult<Json<OrderItem>> {
    let item = OrderItemService::update(state.db(), id, updates).await?;
    Ok(Json(item))
}

/// DELETE /order_items/{id}
async fn delete_order_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    OrderItemService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /order_items/orders/{order_id} - all items of one order
async fn delete_order_items(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    OrderItemService::delete_by_order(state.db(), order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

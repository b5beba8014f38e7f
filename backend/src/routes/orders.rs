//! Order routes
//!
//! The whole group requires an authenticated caller with the USER role.

use crate::auth::{authenticate, authorize};
use crate::error::ApiResult;
use crate::services::OrderService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use storefront_shared::models::{NewOrder, Order, UpdateOrder, USER_ROLE};
use uuid::Uuid;

/// Create order routes
pub fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/:id/:limit", get(list_orders))
        .route(
            "/:id",
            get(get_order).patch(update_order).delete(delete_order),
        )
        .route(
            "/users/:user_id",
            get(list_user_orders).delete(delete_user_orders),
        )
        .route_layer(middleware::from_fn(|req, next| {
            authorize(USER_ROLE, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

/// POST /orders
async fn create_order(
    State(state): State<AppState>,
    Json(new_order): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = OrderService::create(state.db(), new_order).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/{last_seen_id}/{limit} - paginated listing
///
/// The first segment is the id to page from, inclusive.
async fn list_orders(
    State(state): State<AppState>,
    Path((last_seen_id, limit)): Path<(Uuid, i64)>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = OrderService::list(state.db(), last_seen_id, limit).await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    let order = OrderService::get(state.db(), id).await?;
    Ok(Json(order))
}

/// GET /orders/users/{user_id} - all orders of one user
async fn list_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = OrderService::list_by_user(state.db(), user_id).await?;
    Ok(Json(orders))
}

/// PATCH /orders/{id}
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<UpdateOrder>,
) -> ApiResult<Json<Order>> {
    let order = OrderService::update(state.db(), id, updates).await?;
    Ok(Json(order))
}

/// DELETE /orders/{id}
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    OrderService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /orders/users/{user_id} - all orders of one user
async fn delete_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    OrderService::delete_by_user(state.db(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

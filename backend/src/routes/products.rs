//! Product routes
//!
//! Reads are public; mutations are gated on the ADMIN role.

use crate::auth::{authenticate, authorize};
use crate::error::ApiResult;
use crate::services::ProductService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use storefront_shared::models::{NewProduct, Product, UpdateProduct, ADMIN_ROLE};
use uuid::Uuid;

/// Create product routes
pub fn product_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_product))
        .route("/:id", patch(update_product).delete(delete_product))
        .route_layer(middleware::from_fn(|req, next| {
            authorize(ADMIN_ROLE, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/:id/:limit", get(list_products))
        .route("/:id", get(get_product))
        .merge(protected)
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    Json(new_product): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = ProductService::create(state.db(), new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{last_seen_id}/{limit} - paginated listing
///
/// The first segment is the id to page from, inclusive.
async fn list_products(
    State(state): State<AppState>,
    Path((last_seen_id, limit)): Path<(Uuid, i64)>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = ProductService::list(state.db(), last_seen_id, limit).await?;
    Ok(Json(products))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    let product = ProductService::get(state.db(), id).await?;
    Ok(Json(product))
}

/// PATCH /products/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<UpdateProduct>,
) -> ApiResult<Json<Product>> {
    let product = ProductService::update(state.db(), id, updates).await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    ProductService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! User management routes
//!
//! The whole group is gated on the ADMIN role.

use crate::auth::{authenticate, authorize};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use storefront_shared::models::{UpdateUser, User, ADMIN_ROLE};
use uuid::Uuid;

/// Create user routes
pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:id/:limit", get(list_users))
        .route(
            "/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn(|req, next| {
            authorize(ADMIN_ROLE, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

/// GET /users/{last_seen_id}/{limit} - paginated listing
///
/// The first segment is the id to page from, inclusive.
async fn list_users(
    State(state): State<AppState>,
    Path((last_seen_id, limit)): Path<(Uuid, i64)>,
) -> ApiResult<Json<Vec<User>>> {
    let users = UserService::list(state.db(), last_seen_id, limit).await?;
    Ok(Json(users))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = UserService::get(state.db(), id).await?;
    Ok(Json(user))
}

/// PATCH /users/{id}
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    let user = UserService::update(state.db(), id, updates).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    UserService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

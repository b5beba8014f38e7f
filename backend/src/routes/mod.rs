//! Route definitions for the Storefront API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    extract::Request,
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod order_items;
mod orders;
mod products;
mod status;
mod users;

pub use auth::auth_routes;
pub use order_items::order_item_routes;
pub use orders::order_routes;
pub use products::product_routes;
pub use users::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status::status_check))
        .nest("/auth", auth::auth_routes())
        .nest("/users", users::user_routes(state.clone()))
        .nest("/products", products::product_routes(state.clone()))
        .nest("/orders", orders::order_routes(state.clone()))
        .nest("/order_items", order_items::order_item_routes(state.clone()))
        // Apply middleware layers; the last layer added runs first, so the
        // request id is set before the trace span reads it.
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

//! Service status endpoint
//!
//! GET /status reports service liveness plus the health of the backing
//! database, returning 503 when the database is unreachable.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// GET /status
pub async fn status_check(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    let database = match db::health_check(&state.db).await {
        Ok(()) => "healthy".to_string(),
        Err(_) => "unhealthy".to_string(),
    };

    let healthy = database == "healthy";
    let response = StatusResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

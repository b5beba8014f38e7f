//! Authentication routes
//!
//! Sign-up, sign-in, sign-out and token refresh. None of these require a
//! bearer token: sign-out re-verifies the password in the body, and
//! refresh carries both tokens in the body.

use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use storefront_shared::models::{NewUser, User};
use storefront_shared::types::{Credentials, TokenPair};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .route("/refresh", post(refresh))
}

/// POST /auth/signup - create a new user
///
/// The response never contains the password hash.
async fn sign_up(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = AuthService::sign_up(state.db(), new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/signin - issue a token pair for valid credentials
async fn sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<TokenPair>> {
    let pair = AuthService::sign_in(state.db(), state.tokens(), state.jwt(), &credentials).await?;
    Ok(Json(pair))
}

/// POST /auth/signout - delete the caller's refresh-token record
async fn sign_out(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<StatusCode> {
    AuthService::sign_out(state.db(), state.tokens(), &credentials).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/refresh - exchange a bound token pair for a fresh one
async fn refresh(
    State(state): State<AppState>,
    Json(pair): Json<TokenPair>,
) -> ApiResult<Json<TokenPair>> {
    let fresh = AuthService::refresh(state.tokens(), state.jwt(), &pair).await?;
    Ok(Json(fresh))
}

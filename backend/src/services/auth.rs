//! Authentication service
//!
//! Orchestrates sign-up, sign-in, sign-out and refresh over the token
//! codec, the credential verifier and the refresh-token store. Session
//! state is implicit in the presence of a stored refresh-token record:
//! sign-in creates it, refresh rotates it, sign-out deletes it.

use crate::auth::{IssuedTokenPair, PasswordService, TokenCodec};
use crate::error::ApiError;
use crate::repositories::{RefreshTokenRecord, RefreshTokenStore, UserRepository};
use crate::services::UserService;
use sqlx::PgPool;
use storefront_shared::models::{NewUser, User};
use storefront_shared::types::{Credentials, TokenPair};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Create a new user.
    ///
    /// Delegates entirely to the user service; a username/email collision
    /// surfaces as a conflict, never silently.
    pub async fn sign_up(pool: &PgPool, new_user: NewUser) -> Result<User, ApiError> {
        UserService::create(pool, new_user).await
    }

    /// Verify credentials and open a session: mint a token pair and
    /// persist its refresh half as the user's single active record.
    pub async fn sign_in(
        pool: &PgPool,
        store: &dyn RefreshTokenStore,
        codec: &TokenCodec,
        credentials: &Credentials,
    ) -> Result<TokenPair, ApiError> {
        let user = UserRepository::find_by_username(pool, &credentials.username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user '{}'", credentials.username)))?;

        let valid = PasswordService::verify_async(
            credentials.password.clone(),
            user.password_hash.clone(),
        )
        .await
        .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        let user_id = user.id.to_string();
        let issued = codec
            .issue_pair(&user_id, &user.roles)
            .map_err(ApiError::Internal)?;

        // The store does not enforce uniqueness; clear any record a prior
        // session left behind before inserting the new one.
        store.delete(&user_id).await?;
        store.create(&Self::record(&user_id, &issued)).await?;

        Ok(TokenPair {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }

    /// Close the user's session.
    ///
    /// The caller proves identity with the password again; a bearer token
    /// alone is not enough to end a session. Deleting an absent record is
    /// not an error, so signing out twice is harmless.
    pub async fn sign_out(
        pool: &PgPool,
        store: &dyn RefreshTokenStore,
        credentials: &Credentials,
    ) -> Result<(), ApiError> {
        let user = UserRepository::find_by_username(pool, &credentials.username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user '{}'", credentials.username)))?;

        let valid = PasswordService::verify_async(
            credentials.password.clone(),
            user.password_hash.clone(),
        )
        .await
        .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        store.delete(&user.id.to_string()).await?;

        Ok(())
    }

    /// Exchange a valid, bound token pair for a fresh one.
    ///
    /// The access token's `refresh_id` must equal the refresh token's
    /// `token_id`; a pair assembled from two different issuances is
    /// rejected. The stored record is replaced, which invalidates the old
    /// refresh token. The old access token stays valid until its own
    /// expiry; access tokens are never looked up in the store.
    pub async fn refresh(
        store: &dyn RefreshTokenStore,
        codec: &TokenCodec,
        presented: &TokenPair,
    ) -> Result<TokenPair, ApiError> {
        let access_claims = codec.parse_access_token(&presented.access_token)?;
        let refresh_claims = codec.parse_refresh_token(&presented.refresh_token)?;

        if access_claims.refresh_id != refresh_claims.token_id {
            return Err(ApiError::TokenMismatch);
        }

        let issued = codec
            .issue_pair(&access_claims.user_id, &access_claims.roles)
            .map_err(ApiError::Internal)?;

        store
            .replace(
                &access_claims.user_id,
                &Self::record(&access_claims.user_id, &issued),
            )
            .await?;

        Ok(TokenPair {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }

    fn record(user_id: &str, issued: &IssuedTokenPair) -> RefreshTokenRecord {
        RefreshTokenRecord {
            token_id: issued.token_id.clone(),
            user_id: user_id.to_string(),
            token: issued.refresh_token.clone(),
            expires_at: issued.refresh_expires_at,
            used: false,
        }
    }
}

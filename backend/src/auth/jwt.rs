//! JWT token issuance and validation
//!
//! Provides the access/refresh token codec with pre-computed keys.
//! Access tokens carry the holder's roles and the id of the refresh token
//! they were issued alongside; refresh tokens carry only their own id.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject user id
    pub user_id: String,
    /// Id of the refresh token this access token was issued alongside.
    /// Binds the pair together for the refresh operation.
    pub refresh_id: String,
    /// Role labels of the subject
    pub roles: Vec<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by a refresh token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// Subject user id
    pub user_id: String,
    /// Unique id of this refresh token
    pub token_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token parse failure.
///
/// Expiry is reported distinctly so callers can surface it to clients;
/// every other failure collapses into `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not valid: {0}")]
    Invalid(String),

    #[error("token is expired")]
    Expired,
}

/// A freshly minted pair of signed tokens plus the metadata the caller
/// needs to persist the refresh half.
#[derive(Debug, Clone)]
pub struct IssuedTokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Id of the refresh token; the access token's `refresh_id` equals this.
    pub token_id: String,
    pub refresh_expires_at: i64,
}

/// Pre-computed JWT keys for efficient token operations.
/// These are expensive to create, so they are built once at startup.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(salt: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(salt.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(salt.as_bytes())),
        }
    }
}

/// Token lifetime configuration.
#[derive(Clone)]
pub struct TokenLifetimes {
    pub access_token_expiry_secs: i64,
    pub refresh_token_expiry_secs: i64,
}

/// Codec for signing and parsing the two claim shapes.
///
/// Signing uses HS512 over the configured salt; validation accepts the
/// HMAC family only. Token headers are attacker-controlled, so a token
/// declaring any other algorithm is rejected before its claims are
/// considered, whatever its payload decodes to.
#[derive(Clone)]
pub struct TokenCodec {
    keys: JwtKeys,
    lifetimes: TokenLifetimes,
}

impl TokenCodec {
    /// Create a new codec with pre-computed keys.
    ///
    /// Call once at application startup and store in AppState;
    /// the salt and lifetimes are fixed for the process lifetime.
    pub fn new(salt: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(salt),
            lifetimes: TokenLifetimes {
                access_token_expiry_secs,
                refresh_token_expiry_secs,
            },
        }
    }

    /// Mint a new access/refresh token pair for a user.
    ///
    /// A fresh `token_id` is generated for the refresh token and embedded
    /// in the access token as `refresh_id`, so the two halves of the pair
    /// stay bound to each other.
    pub fn issue_pair(&self, user_id: &str, roles: &[String]) -> Result<IssuedTokenPair> {
        let now = Utc::now();
        let token_id = Uuid::new_v4().to_string();

        let refresh_expires_at =
            (now + Duration::seconds(self.lifetimes.refresh_token_expiry_secs)).timestamp();
        let refresh_token = self.create_refresh_token(user_id, &token_id, refresh_expires_at)?;

        let access_expires_at =
            (now + Duration::seconds(self.lifetimes.access_token_expiry_secs)).timestamp();
        let access_token =
            self.create_access_token(user_id, &token_id, roles, access_expires_at)?;

        Ok(IssuedTokenPair {
            access_token,
            refresh_token,
            token_id,
            refresh_expires_at,
        })
    }

    fn create_access_token(
        &self,
        user_id: &str,
        refresh_id: &str,
        roles: &[String],
        expires_at: i64,
    ) -> Result<String> {
        let claims = AccessTokenClaims {
            user_id: user_id.to_string(),
            refresh_id: refresh_id.to_string(),
            roles: roles.to_vec(),
            exp: expires_at,
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("failed to sign access token: {}", e))
    }

    fn create_refresh_token(&self, user_id: &str, token_id: &str, expires_at: i64) -> Result<String> {
        let claims = RefreshTokenClaims {
            user_id: user_id.to_string(),
            token_id: token_id.to_string(),
            exp: expires_at,
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("failed to sign refresh token: {}", e))
    }

    /// Parse and validate an access token.
    pub fn parse_access_token(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        decode::<AccessTokenClaims>(token, &self.keys.decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(Self::map_error)
    }

    /// Parse and validate a refresh token.
    pub fn parse_refresh_token(&self, token: &str) -> Result<RefreshTokenClaims, TokenError> {
        decode::<RefreshTokenClaims>(token, &self.keys.decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(Self::map_error)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS512);
        // HMAC family only; the header alg is untrusted input.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation
    }

    fn map_error(err: jsonwebtoken::errors::Error) -> TokenError {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err.to_string()),
        }
    }

    pub fn access_token_expiry_secs(&self) -> i64 {
        self.lifetimes.access_token_expiry_secs
    }

    pub fn refresh_token_expiry_secs(&self) -> i64 {
        self.lifetimes.refresh_token_expiry_secs
    }
}

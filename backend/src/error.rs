//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::auth::TokenError;
use crate::repositories::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use storefront_shared::types::ErrorResponse;
use storefront_shared::validation::FieldErrors;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation error")]
    Validation(#[from] FieldErrors),

    #[error("header 'Authorization' is missing")]
    HeaderMissing,

    #[error("expected 'Authorization' header format: Bearer <token>")]
    HeaderFormat,

    #[error("there is no JWT claims in request context")]
    NoClaimsInContext,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("access token is not bound to the presented refresh token")]
    TokenMismatch,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("token store error")]
    Store(#[from] StoreError),

    #[error("database error")]
    Database(sqlx::Error),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::Duplicate("resource already exists".to_string())
            }
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match &self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation error".to_string(),
                Some(errors.to_string()),
            ),
            ApiError::HeaderMissing | ApiError::HeaderFormat | ApiError::NoClaimsInContext => {
                (StatusCode::BAD_REQUEST, self.to_string(), None)
            }
            ApiError::Token(_)
            | ApiError::TokenMismatch
            | ApiError::InvalidCredentials
            | ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string(), None),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string(), None),
            ApiError::Duplicate(_) => (StatusCode::CONFLICT, self.to_string(), None),
            ApiError::Store(err) => {
                error!("Token store error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            fields,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_is_bad_request() {
        let error = ApiError::Validation(FieldErrors(vec![]));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let error = ApiError::Token(TokenError::Expired);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn token_mismatch_is_unauthorized() {
        let error = ApiError::TokenMismatch;
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_is_404() {
        let error = ApiError::NotFound("user abc".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_is_conflict() {
        let error = ApiError::Duplicate("user already exists".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_does_not_leak_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("connection string was postgres://..."));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! API request and response types

use serde::{Deserialize, Serialize};

/// A pair of signed access/refresh tokens.
///
/// Used both as the success body of sign-in and refresh, and as the request
/// body of refresh (the caller presents the pair it currently holds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Credentials presented at sign-in and sign-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// API error response body.
///
/// `fields`, when present, lists the input fields that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

//! Authentication module
//!
//! Provides the JWT token codec, bcrypt password hashing and the
//! authentication/authorization middleware.

mod jwt;
mod middleware;
mod password;

pub use jwt::{
    AccessTokenClaims, IssuedTokenPair, RefreshTokenClaims, TokenCodec, TokenError,
};
pub use middleware::{authenticate, authorize};
pub use password::PasswordService;

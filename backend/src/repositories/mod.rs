//! Data access layer
//!
//! Relational repositories over the Postgres pool for business entities,
//! plus the document-store port for refresh tokens.

pub mod order;
pub mod order_item;
pub mod product;
pub mod tokens;
pub mod user;

pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use product::ProductRepository;
pub use tokens::{
    InMemoryTokenStore, RedisTokenStore, RefreshTokenRecord, RefreshTokenStore, StoreError,
};
pub use user::UserRepository;

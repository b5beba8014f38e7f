//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the token codec and the credential verifier.

pub mod auth;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;

pub use auth::AuthService;
pub use order::OrderService;
pub use order_item::OrderItemService;
pub use product::ProductService;
pub use user::UserService;

//! Domain entities for the Storefront API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Role label granting access to administrative routes.
pub const ADMIN_ROLE: &str = "ADMIN";
/// Role label granted to every regular account.
pub const USER_ROLE: &str = "USER";

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Salted one-way hash of the password. Never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Information needed to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password_confirm: String,
    #[validate(length(min = 1, message = "at least one role is required"))]
    pub roles: Vec<String>,
}

/// Partial update for an existing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// A particular product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Information needed to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
}

/// Partial update for an existing product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
}

/// A particular order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Information needed to create a new order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrder {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Partial update for an existing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOrder {
    pub status: Option<String>,
}

/// A line item belonging to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Information needed to create a new order item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrderItem {
    pub order_id: Uuid,
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

/// Partial update for an existing order item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOrderItem {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

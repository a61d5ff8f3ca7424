//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`, and `Validate` where input
//! validation applies.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Catalog Requests
// ============================================================================

/// Create item request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 50, message = "SKU must be 1-50 characters"))]
    pub sku: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i64,

    /// Per-item low-stock bar; omit to use the configured default
    #[serde(default)]
    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: i64,

    pub cost: Option<Decimal>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Category ID (snowflake as string)
    pub category_id: String,
}

/// Update item request; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 50, message = "SKU must be 1-50 characters"))]
    pub sku: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New stock on hand; flows through the version-checked stock write
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i64>,

    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: Option<i64>,

    pub cost: Option<Decimal>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Category ID (snowflake as string)
    pub category_id: Option<String>,
}

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

/// Rename category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

// ============================================================================
// Cart Requests
// ============================================================================

/// Add an item to the cart
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCartLineRequest {
    /// Item ID (snowflake as string)
    pub item_id: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

/// Overwrite a cart line's quantity; 0 removes the line
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartLineRequest {
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i64,
}

// ============================================================================
// Inventory Requests
// ============================================================================

/// Return borrowed quantity to the catalog
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReturnItemRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

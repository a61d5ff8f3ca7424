//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Category create request
#[derive(Debug, Serialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl CreateCategoryRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Category {}", unique_suffix()),
        }
    }
}

/// Category response
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
}

/// Item create request
#[derive(Debug, Serialize)]
pub struct CreateItemRequest {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub category_id: String,
}

impl CreateItemRequest {
    pub fn unique(category_id: &str, quantity: i64) -> Self {
        let suffix = unique_suffix();
        Self {
            sku: format!("TST-{suffix:06}"),
            name: format!("Test Item {suffix}"),
            quantity,
            category_id: category_id.to_string(),
        }
    }
}

/// Item response
#[derive(Debug, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub status: String,
}

/// Cart line add request
#[derive(Debug, Serialize)]
pub struct AddCartLineRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// Cart response
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    pub id: String,
    pub lines: Vec<CartLineResponse>,
}

/// Cart line response
#[derive(Debug, Deserialize)]
pub struct CartLineResponse {
    pub item: ItemSlimResponse,
    pub quantity: i64,
}

/// Slim item response
#[derive(Debug, Deserialize)]
pub struct ItemSlimResponse {
    pub id: String,
    pub sku: String,
    pub in_stock: i64,
}

/// Commit report response
#[derive(Debug, Deserialize)]
pub struct CommitReportResponse {
    pub committed: Vec<CommittedLineResponse>,
    pub failed: Vec<FailedLineResponse>,
}

/// Committed line
#[derive(Debug, Deserialize)]
pub struct CommittedLineResponse {
    pub item_id: String,
    pub quantity: i64,
    pub remaining_stock: i64,
}

/// Failed line
#[derive(Debug, Deserialize)]
pub struct FailedLineResponse {
    pub item_id: String,
    pub quantity: i64,
    pub code: String,
}

/// Ledger entry response
#[derive(Debug, Deserialize)]
pub struct LedgerEntryResponse {
    pub item: ItemSlimResponse,
    pub quantity: i64,
}

/// Return request
#[derive(Debug, Serialize)]
pub struct ReturnItemRequest {
    pub quantity: i64,
}

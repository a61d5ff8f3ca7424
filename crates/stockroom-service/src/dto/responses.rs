//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Current authenticated user response
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Catalog Responses
// ============================================================================

/// Category response
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Full item response
#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub min_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Option<CategoryResponse>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Slim item fields embedded in cart and ledger responses
#[derive(Debug, Clone, Serialize)]
pub struct ItemSlimResponse {
    pub id: String,
    pub sku: String,
    pub name: String,
    /// Catalog stock on hand
    pub in_stock: i64,
}

// ============================================================================
// Cart Responses
// ============================================================================

/// A single cart line
#[derive(Debug, Clone, Serialize)]
pub struct CartLineResponse {
    pub item: ItemSlimResponse,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

/// The user's cart with all lines
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: String,
    pub lines: Vec<CartLineResponse>,
}

/// Outcome of a cart commit. Lines are processed independently, so a
/// single commit can contain both committed and failed lines.
#[derive(Debug, Serialize)]
pub struct CommitReportResponse {
    pub committed: Vec<CommittedLineResponse>,
    pub failed: Vec<FailedLineResponse>,
}

/// A line that was transferred into the ledger
#[derive(Debug, Clone, Serialize)]
pub struct CommittedLineResponse {
    pub item_id: String,
    pub quantity: i64,
    /// Catalog stock remaining after the transfer
    pub remaining_stock: i64,
}

/// A line that could not be committed
#[derive(Debug, Clone, Serialize)]
pub struct FailedLineResponse {
    pub item_id: String,
    pub quantity: i64,
    pub code: String,
    pub message: String,
}

// ============================================================================
// Inventory Responses
// ============================================================================

/// One borrowed item in the user's personal inventory
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntryResponse {
    pub item: ItemSlimResponse,
    pub quantity: i64,
    pub borrowed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

/// Aggregate numbers for the dashboard header
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub total_items: i64,
    pub low_stock: i64,
    pub out_of_stock: i64,
    pub inventory_value: Decimal,
    pub new_items_7d: i64,
    pub categories: i64,
}

/// One row of the recent-activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub id: String,
    pub name: String,
    /// "created", "updated", or "retired"
    pub action: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
}

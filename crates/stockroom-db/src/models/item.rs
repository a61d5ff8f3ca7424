//! Item database model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for the items table
#[derive(Debug, Clone, FromRow)]
pub struct ItemModel {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub cost: Option<Decimal>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category_id: i64,
    pub status: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
}

impl ItemModel {
    /// Check if the item is visible in listings
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

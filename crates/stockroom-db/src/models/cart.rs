//! Cart database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the carts table
#[derive(Debug, Clone, FromRow)]
pub struct CartModel {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Database model for the cart_lines table
#[derive(Debug, Clone, FromRow)]
pub struct CartLineModel {
    pub id: i64,
    pub cart_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

//! Category database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the item_categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

//! Item category entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Catalog category. Names are unique; a category cannot be deleted while
/// items still reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCategory {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ItemCategory {
    /// Create a new category
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
        }
    }
}

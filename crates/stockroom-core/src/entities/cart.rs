//! Cart entities - per-user staging area before stock is committed

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Per-user cart, created lazily on first access and never deleted.
/// Commit and clear both empty its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new cart for a user
    pub fn new(id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// A single (item, quantity) line in a cart.
///
/// At most one line exists per (cart, item); re-adding an item increases
/// the existing line instead of creating a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: Snowflake,
    pub cart_id: Snowflake,
    pub item_id: Snowflake,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Create a new line
    pub fn new(id: Snowflake, cart_id: Snowflake, item_id: Snowflake, quantity: i64) -> Self {
        Self {
            id,
            cart_id,
            item_id,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Merge an additional request for the same item into this line
    pub fn add(&mut self, quantity: i64) {
        self.quantity += quantity;
    }
}

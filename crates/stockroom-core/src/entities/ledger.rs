//! Personal inventory ledger entry

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Quantity of an item currently checked out by a user.
///
/// At most one entry exists per (borrower, item); the entry is deleted
/// when its quantity reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Snowflake,
    pub borrower_id: Snowflake,
    pub item_id: Snowflake,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Create a new entry
    pub fn new(id: Snowflake, borrower_id: Snowflake, item_id: Snowflake, quantity: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            borrower_id,
            item_id,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether returning `quantity` is possible
    #[inline]
    pub fn can_return(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

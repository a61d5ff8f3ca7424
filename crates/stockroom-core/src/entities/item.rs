//! Item entity - a stocked catalog record

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Lifecycle state of a catalog item
///
/// A Retired item is hidden from listings but its row survives as long as
/// ledger entries or remaining stock reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Retired,
}

impl ItemStatus {
    /// Database / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Retired => "retired",
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "retired" => Ok(Self::Retired),
            _ => Err(()),
        }
    }
}

/// Catalog item with stock on hand
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Snowflake,
    pub sku: String,
    pub name: String,
    /// Stock on hand. Never negative.
    pub quantity: i64,
    /// Per-item low-stock bar; 0 means "use the configured default"
    pub min_quantity: i64,
    pub cost: Option<Decimal>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category_id: Snowflake,
    pub status: ItemStatus,
    /// Optimistic concurrency token, bumped on every stock write
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Snowflake>,
    pub updated_by: Option<Snowflake>,
}

impl Item {
    /// Create a new Item with required fields
    pub fn new(
        id: Snowflake,
        sku: String,
        name: String,
        quantity: i64,
        category_id: Snowflake,
        created_by: Option<Snowflake>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            sku,
            name,
            quantity,
            min_quantity: 0,
            cost: None,
            location: None,
            description: None,
            category_id,
            status: ItemStatus::Active,
            version: 0,
            created_at: now,
            updated_at: now,
            created_by,
            updated_by: created_by,
        }
    }

    /// Check whether the item is visible in listings
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    /// Check whether the catalog can satisfy a request of `quantity`
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// The low-stock bar in effect: the per-item bar when set, else `default_bar`
    #[inline]
    pub fn effective_min_quantity(&self, default_bar: i64) -> i64 {
        if self.min_quantity > 0 {
            self.min_quantity
        } else {
            default_bar
        }
    }

    /// Stamp an update by `actor`
    pub fn touch(&mut self, actor: Option<Snowflake>) {
        self.updated_at = Utc::now();
        self.updated_by = actor;
    }

    /// Mark the item as retired
    pub fn retire(&mut self, actor: Option<Snowflake>) {
        self.status = ItemStatus::Retired;
        self.touch(actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(quantity: i64) -> Item {
        Item::new(
            Snowflake::new(1),
            "WM-0042".to_string(),
            "Wireless Mouse".to_string(),
            quantity,
            Snowflake::new(9),
            Some(Snowflake::new(5)),
        )
    }

    #[test]
    fn test_new_item_is_active() {
        let item = sample_item(10);
        assert!(item.is_active());
        assert_eq!(item.version, 0);
        assert_eq!(item.created_by, item.updated_by);
    }

    #[test]
    fn test_has_stock() {
        let item = sample_item(3);
        assert!(item.has_stock(3));
        assert!(!item.has_stock(4));
        assert!(item.has_stock(0));
    }

    #[test]
    fn test_effective_min_quantity_falls_back_to_default() {
        let mut item = sample_item(10);
        assert_eq!(item.effective_min_quantity(10), 10);

        item.min_quantity = 4;
        assert_eq!(item.effective_min_quantity(10), 4);
    }

    #[test]
    fn test_retire() {
        let mut item = sample_item(0);
        item.retire(Some(Snowflake::new(7)));
        assert_eq!(item.status, ItemStatus::Retired);
        assert!(!item.is_active());
        assert_eq!(item.updated_by, Some(Snowflake::new(7)));
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [ItemStatus::Active, ItemStatus::Retired] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
        assert!("deleted".parse::<ItemStatus>().is_err());
    }
}

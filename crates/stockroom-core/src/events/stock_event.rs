//! Stock events - emitted when catalog state changes
//!
//! These events are used for:
//! - Low-stock alerting (email, webhook, live dashboard)
//! - Keeping the search index in sync with the catalog
//!
//! Services emit them explicitly after a successful write; nothing in the
//! storage layer fires them implicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Item;
use crate::value_objects::Snowflake;

/// Denormalized item fields carried by events so consumers never need a
/// second catalog read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: Snowflake,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub category: String,
}

impl ItemSummary {
    /// Build a summary from an item plus its resolved category name
    pub fn from_item(item: &Item, category: impl Into<String>) -> Self {
        Self {
            id: item.id,
            sku: item.sku.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            min_quantity: item.min_quantity,
            category: category.into(),
        }
    }
}

/// All possible stock events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockEvent {
    /// `Item.quantity` was mutated (commit, return, or direct catalog edit)
    QuantityChanged {
        item: ItemSummary,
        previous: i64,
        current: i64,
        changed_by: Option<Snowflake>,
        timestamp: DateTime<Utc>,
    },
    /// An item was created or edited (including retirement)
    ItemUpserted {
        item: ItemSummary,
        timestamp: DateTime<Utc>,
    },
    /// An item was physically removed from the catalog
    ItemDeleted {
        item_id: Snowflake,
        timestamp: DateTime<Utc>,
    },
}

impl StockEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::QuantityChanged { .. } => "QUANTITY_CHANGED",
            Self::ItemUpserted { .. } => "ITEM_UPSERTED",
            Self::ItemDeleted { .. } => "ITEM_DELETED",
        }
    }

    /// Build a quantity-changed event
    pub fn quantity_changed(
        item: ItemSummary,
        previous: i64,
        current: i64,
        changed_by: Option<Snowflake>,
    ) -> Self {
        Self::QuantityChanged {
            item,
            previous,
            current,
            changed_by,
            timestamp: Utc::now(),
        }
    }

    /// Build an item-upserted event
    pub fn item_upserted(item: ItemSummary) -> Self {
        Self::ItemUpserted {
            item,
            timestamp: Utc::now(),
        }
    }

    /// Build an item-deleted event
    pub fn item_deleted(item_id: Snowflake) -> Self {
        Self::ItemDeleted {
            item_id,
            timestamp: Utc::now(),
        }
    }
}

/// Payload delivered to alert sinks when stock crosses the low-stock bar.
///
/// Field names match the JSON contract consumed by downstream dashboards
/// and the notification webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub id: Snowflake,
    pub name: String,
    pub sku: String,
    pub in_stock: i64,
    pub min_qty: i64,
    pub category: String,
}

impl LowStockAlert {
    /// Build an alert from an item summary and the bar that was crossed
    pub fn new(item: &ItemSummary, current: i64, threshold: i64) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            sku: item.sku.clone(),
            in_stock: current,
            min_qty: threshold,
            category: item.category.clone(),
        }
    }

    /// Email subject line for this alert
    pub fn subject(&self) -> String {
        format!("[Stockroom] Low stock: {} (SKU {})", self.name, self.sku)
    }

    /// Plain-text email body for this alert
    pub fn body(&self) -> String {
        format!(
            "Item has low stock.\n\nName: {}\nSKU: {}\nIn stock: {}\nThreshold: {}\n",
            self.name, self.sku, self.in_stock, self.min_qty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ItemSummary {
        ItemSummary {
            id: Snowflake::new(12),
            sku: "KB-0007".to_string(),
            name: "Mechanical Keyboard".to_string(),
            quantity: 9,
            min_quantity: 0,
            category: "Peripherals".to_string(),
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = StockEvent::quantity_changed(summary(), 11, 9, Some(Snowflake::new(1)));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("QUANTITY_CHANGED"));

        let parsed: StockEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "QUANTITY_CHANGED");
    }

    #[test]
    fn test_alert_payload_shape() {
        let alert = LowStockAlert::new(&summary(), 9, 10);
        let json = serde_json::to_value(&alert).unwrap();

        assert_eq!(json["sku"], "KB-0007");
        assert_eq!(json["in_stock"], 9);
        assert_eq!(json["min_qty"], 10);
        assert_eq!(json["category"], "Peripherals");
        // Snowflakes serialize as strings
        assert_eq!(json["id"], "12");
    }

    #[test]
    fn test_alert_email_rendering() {
        let alert = LowStockAlert::new(&summary(), 2, 10);
        assert_eq!(
            alert.subject(),
            "[Stockroom] Low stock: Mechanical Keyboard (SKU KB-0007)"
        );
        assert!(alert.body().contains("In stock: 2"));
        assert!(alert.body().contains("Threshold: 10"));
    }
}

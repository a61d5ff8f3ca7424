//! Item entity <-> model mapper

use stockroom_core::entities::{Item, ItemStatus};
use stockroom_core::value_objects::Snowflake;

use crate::models::ItemModel;

/// Convert ItemModel to Item entity
impl From<ItemModel> for Item {
    fn from(model: ItemModel) -> Self {
        Item {
            id: Snowflake::new(model.id),
            sku: model.sku,
            name: model.name,
            quantity: model.quantity,
            min_quantity: model.min_quantity,
            cost: model.cost,
            location: model.location,
            description: model.description,
            category_id: Snowflake::new(model.category_id),
            // The CHECK constraint on the column keeps values in range
            status: model.status.parse().unwrap_or(ItemStatus::Active),
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by.map(Snowflake::new),
            updated_by: model.updated_by.map(Snowflake::new),
        }
    }
}

//! Category entity <-> model mapper

use stockroom_core::entities::ItemCategory;
use stockroom_core::value_objects::Snowflake;

use crate::models::CategoryModel;

impl From<CategoryModel> for ItemCategory {
    fn from(model: CategoryModel) -> Self {
        ItemCategory {
            id: Snowflake::new(model.id),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

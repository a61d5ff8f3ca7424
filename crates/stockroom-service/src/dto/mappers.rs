//! Entity → response mappers

use stockroom_core::entities::{Item, ItemCategory, User};

use super::responses::{CategoryResponse, CurrentUserResponse, ItemResponse, ItemSlimResponse};

impl From<&ItemCategory> for CategoryResponse {
    fn from(category: &ItemCategory) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            created_at: category.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

impl From<&Item> for ItemSlimResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            sku: item.sku.clone(),
            name: item.name.clone(),
            in_stock: item.quantity,
        }
    }
}

impl ItemResponse {
    /// Build a full item response, embedding the category when resolved
    pub fn from_item(item: &Item, category: Option<&ItemCategory>) -> Self {
        Self {
            id: item.id.to_string(),
            sku: item.sku.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            min_quantity: item.min_quantity,
            cost: item.cost,
            location: item.location.clone(),
            description: item.description.clone(),
            category: category.map(CategoryResponse::from),
            status: item.status.as_str().to_string(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

//! Cart entity <-> model mappers

use stockroom_core::entities::{Cart, CartLine};
use stockroom_core::value_objects::Snowflake;

use crate::models::{CartLineModel, CartModel};

impl From<CartModel> for Cart {
    fn from(model: CartModel) -> Self {
        Cart {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}

impl From<CartLineModel> for CartLine {
    fn from(model: CartLineModel) -> Self {
        CartLine {
            id: Snowflake::new(model.id),
            cart_id: Snowflake::new(model.cart_id),
            item_id: Snowflake::new(model.item_id),
            quantity: model.quantity,
            added_at: model.added_at,
        }
    }
}

//! Database models with SQLx `FromRow` derives

mod cart;
mod category;
mod item;
mod ledger;
mod user;

pub use cart::{CartLineModel, CartModel};
pub use category::CategoryModel;
pub use item::ItemModel;
pub use ledger::LedgerEntryModel;
pub use user::UserModel;

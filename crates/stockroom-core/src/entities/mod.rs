//! Domain entities

mod cart;
mod category;
mod item;
mod ledger;
mod user;

pub use cart::{Cart, CartLine};
pub use category::ItemCategory;
pub use item::{Item, ItemStatus};
pub use ledger::LedgerEntry;
pub use user::User;

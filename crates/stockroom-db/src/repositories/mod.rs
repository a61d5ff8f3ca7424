//! PostgreSQL repository implementations

mod cart;
mod category;
mod error;
mod item;
mod ledger;
mod user;

pub use cart::PgCartRepository;
pub use category::PgCategoryRepository;
pub use item::PgItemRepository;
pub use ledger::PgLedgerRepository;
pub use user::PgUserRepository;

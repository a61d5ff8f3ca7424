//! Entity ↔ model mappers

mod cart;
mod category;
mod item;
mod ledger;
mod user;

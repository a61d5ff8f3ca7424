//! Domain events

mod stock_event;

pub use stock_event::{ItemSummary, LowStockAlert, StockEvent};

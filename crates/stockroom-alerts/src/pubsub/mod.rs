//! Redis Pub/Sub for live-dashboard listeners

mod channels;
mod publisher;

pub use channels::{DashboardChannel, ACTIVITY_CHANNEL, LOW_STOCK_CHANNEL};
pub use publisher::{DashboardEvent, Publisher};

//! # stockroom-alerts
//!
//! Outbound side-effect layer: low-stock alert sinks (email, webhook, live
//! dashboard over Redis Pub/Sub) and the OpenSearch catalog indexer.
//!
//! Everything in this crate is best-effort by contract: callers time-box
//! deliveries, log failures, and never let them fail the mutation that
//! triggered them.

pub mod index;
pub mod pool;
pub mod pubsub;
pub mod sinks;

// Re-export commonly used types
pub use index::{NoopIndexer, OpenSearchIndexer};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
pub use pubsub::{DashboardChannel, DashboardEvent, Publisher};
pub use sinks::{DashboardSink, EmailSink, WebhookSink};

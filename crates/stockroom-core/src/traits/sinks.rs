//! Outbound side-effect ports - alert delivery and search indexing
//!
//! Implementations live in the alerts crate. Every call is best-effort:
//! the caller logs and swallows failures, they never fail the mutation
//! that triggered them.

use async_trait::async_trait;
use thiserror::Error;

use crate::events::{ItemSummary, LowStockAlert};
use crate::value_objects::Snowflake;

/// Error from a delivery attempt to an external sink
#[derive(Debug, Error)]
#[error("delivery via {sink} failed: {reason}")]
pub struct DeliveryError {
    pub sink: &'static str,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(sink: &'static str, reason: impl Into<String>) -> Self {
        Self {
            sink,
            reason: reason.into(),
        }
    }
}

/// A destination for low-stock alerts (email, webhook, live dashboard)
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Deliver one alert
    async fn deliver(&self, alert: &LowStockAlert) -> Result<(), DeliveryError>;
}

/// The search-index collaborator keeping item documents in sync
#[async_trait]
pub trait SearchIndexer: Send + Sync {
    /// Create the index with its mapping if it does not exist yet
    async fn ensure_index(&self) -> Result<(), DeliveryError>;

    /// Upsert one item document
    async fn upsert(&self, item: &ItemSummary) -> Result<(), DeliveryError>;

    /// Remove one item document
    async fn remove(&self, item_id: Snowflake) -> Result<(), DeliveryError>;

    /// Reindex the given items; returns how many documents were written
    async fn reindex(&self, items: &[ItemSummary]) -> Result<usize, DeliveryError>;
}

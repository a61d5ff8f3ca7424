//! Live-dashboard alert sink
//!
//! Pushes the alert onto the `low_stock` Redis channel; dashboard
//! frontends hold a subscription and render alerts as they arrive.

use async_trait::async_trait;

use stockroom_core::events::LowStockAlert;
use stockroom_core::traits::{AlertSink, DeliveryError};

use crate::pubsub::{DashboardChannel, DashboardEvent, Publisher};

/// Publishes low-stock alerts to subscribed dashboard listeners
pub struct DashboardSink {
    publisher: Publisher,
}

impl DashboardSink {
    /// Create a new dashboard sink
    #[must_use]
    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl AlertSink for DashboardSink {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    async fn deliver(&self, alert: &LowStockAlert) -> Result<(), DeliveryError> {
        let data = serde_json::to_value(alert)
            .map_err(|e| DeliveryError::new("dashboard", e.to_string()))?;
        let event = DashboardEvent::new("LOW_STOCK_ALERT", data);

        self.publisher
            .publish(DashboardChannel::LowStock, &event)
            .await
            .map_err(|e| DeliveryError::new("dashboard", e.to_string()))?;

        Ok(())
    }
}

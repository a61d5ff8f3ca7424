//! Outbound webhook alert sink

use async_trait::async_trait;
use std::time::Duration;

use stockroom_core::events::LowStockAlert;
use stockroom_core::traits::{AlertSink, DeliveryError};

/// POSTs the alert payload to a configured endpoint
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    /// Create a new webhook sink
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.into(),
        }
    }

    /// Whether an endpoint is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, alert: &LowStockAlert) -> Result<(), DeliveryError> {
        if !self.is_configured() {
            return Ok(());
        }

        let response = self
            .client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| DeliveryError::new("webhook", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::new(
                "webhook",
                format!("endpoint responded with {}", response.status()),
            ));
        }

        Ok(())
    }
}

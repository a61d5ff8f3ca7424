//! Email alert sink backed by the SendGrid v3 REST API

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use stockroom_core::events::LowStockAlert;
use stockroom_core::traits::{AlertSink, DeliveryError};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Sends low-stock alert emails to the configured admin recipients
pub struct EmailSink {
    client: reqwest::Client,
    api_key: String,
    from_email: String,
    recipients: Vec<String>,
}

impl EmailSink {
    /// Create a new email sink
    pub fn new(
        api_key: impl Into<String>,
        from_email: impl Into<String>,
        recipients: Vec<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            from_email: from_email.into(),
            recipients,
        }
    }

    /// Whether the sink has enough configuration to deliver anything
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.recipients.is_empty()
    }

    fn mail_payload(&self, alert: &LowStockAlert) -> serde_json::Value {
        json!({
            "personalizations": [{
                "to": self.recipients.iter().map(|e| json!({"email": e})).collect::<Vec<_>>()
            }],
            "from": {"email": self.from_email},
            "subject": alert.subject(),
            "content": [{"type": "text/plain", "value": alert.body()}]
        })
    }
}

#[async_trait]
impl AlertSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, alert: &LowStockAlert) -> Result<(), DeliveryError> {
        if !self.is_configured() {
            return Ok(());
        }

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&self.mail_payload(alert))
            .send()
            .await
            .map_err(|e| DeliveryError::new("email", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::new(
                "email",
                format!("SendGrid responded with {}", response.status()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Snowflake;

    fn sample_alert() -> LowStockAlert {
        LowStockAlert {
            id: Snowflake::new(1),
            name: "Wireless Mouse".to_string(),
            sku: "WM-0042".to_string(),
            in_stock: 3,
            min_qty: 10,
            category: "Peripherals".to_string(),
        }
    }

    #[test]
    fn test_unconfigured_sink() {
        let sink = EmailSink::new("", "no-reply@stockroom.local", vec![], Duration::from_secs(3));
        assert!(!sink.is_configured());
    }

    #[test]
    fn test_mail_payload_shape() {
        let sink = EmailSink::new(
            "key",
            "no-reply@stockroom.local",
            vec!["ops@example.com".to_string(), "owner@example.com".to_string()],
            Duration::from_secs(3),
        );
        let payload = sink.mail_payload(&sample_alert());

        assert_eq!(
            payload["personalizations"][0]["to"][1]["email"],
            "owner@example.com"
        );
        assert_eq!(payload["from"]["email"], "no-reply@stockroom.local");
        assert!(payload["subject"]
            .as_str()
            .unwrap()
            .contains("Low stock: Wireless Mouse"));
    }
}

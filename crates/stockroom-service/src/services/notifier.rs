//! Low-stock notifier
//!
//! Observes quantity changes and fans alerts out to the configured sinks.
//! Dispatch is fire-and-forget: every delivery is time-boxed, failures are
//! logged and swallowed, and the triggering mutation never waits on a sink.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use stockroom_common::AlertsConfig;
use stockroom_core::events::{ItemSummary, LowStockAlert, StockEvent};
use stockroom_core::traits::AlertSink;

/// Watches stock movements and raises alerts when an item's quantity
/// crosses its low-stock bar.
pub struct LowStockNotifier {
    default_bar: i64,
    refire_every_decrement: bool,
    dispatch_timeout: Duration,
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl LowStockNotifier {
    /// Create a notifier with no sinks attached yet
    #[must_use]
    pub fn new(config: &AlertsConfig) -> Self {
        Self {
            default_bar: config.low_stock_threshold,
            refire_every_decrement: config.refire_every_decrement,
            dispatch_timeout: Duration::from_secs(config.dispatch_timeout_secs),
            sinks: Vec::new(),
        }
    }

    /// Attach a delivery sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// The low-stock bar applied to items without a per-item bar
    #[must_use]
    pub fn default_bar(&self) -> i64 {
        self.default_bar
    }

    /// React to a stock event. Only quantity changes are of interest here.
    pub fn observe(&self, event: &StockEvent) {
        if let StockEvent::QuantityChanged {
            item,
            previous,
            current,
            ..
        } = event
        {
            if let Some(alert) = self.decide(item, Some(*previous), *current) {
                self.emit(alert);
            }
        }
    }

    /// React to an item entering the catalog. Fires when the initial
    /// quantity is already at or below the bar.
    pub fn observe_created(&self, item: &ItemSummary) {
        if let Some(alert) = self.decide(item, None, item.quantity) {
            self.emit(alert);
        }
    }

    /// Apply the alert policy; `previous` is None for newly created items.
    ///
    /// Default policy fires only on the crossing edge (previous above the
    /// bar, current at or below). The every-decrement mode re-fires on any
    /// decrement that lands at or below the bar.
    pub fn decide(
        &self,
        item: &ItemSummary,
        previous: Option<i64>,
        current: i64,
    ) -> Option<LowStockAlert> {
        let bar = if item.min_quantity > 0 {
            item.min_quantity
        } else {
            self.default_bar
        };

        let fire = match previous {
            None => current <= bar,
            Some(prev) => {
                if self.refire_every_decrement {
                    current <= bar && current < prev
                } else {
                    prev > bar && current <= bar
                }
            }
        };

        fire.then(|| LowStockAlert::new(item, current, bar))
    }

    /// Hand an alert to every sink on a detached task
    fn emit(&self, alert: LowStockAlert) {
        let sinks = self.sinks.clone();
        let timeout = self.dispatch_timeout;

        tokio::spawn(async move {
            Self::deliver_all(&sinks, timeout, &alert).await;
        });
    }

    /// Deliver one alert to every sink, time-boxing each attempt
    pub(crate) async fn deliver_all(
        sinks: &[Arc<dyn AlertSink>],
        timeout: Duration,
        alert: &LowStockAlert,
    ) {
        for sink in sinks {
            match tokio::time::timeout(timeout, sink.deliver(alert)).await {
                Ok(Ok(())) => {
                    debug!(sink = sink.name(), sku = %alert.sku, "Low-stock alert delivered");
                }
                Ok(Err(e)) => {
                    warn!(sink = sink.name(), sku = %alert.sku, error = %e, "Low-stock alert delivery failed");
                }
                Err(_) => {
                    warn!(sink = sink.name(), sku = %alert.sku, "Low-stock alert delivery timed out");
                }
            }
        }
    }
}

//! OpenSearch catalog indexer
//!
//! Keeps one document per item in sync with the catalog. All calls are
//! best-effort; callers log failures and move on.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use stockroom_common::SearchConfig;
use stockroom_core::events::ItemSummary;
use stockroom_core::traits::{DeliveryError, SearchIndexer};
use stockroom_core::value_objects::Snowflake;

/// OpenSearch-backed implementation of the search-index collaborator
pub struct OpenSearchIndexer {
    client: reqwest::Client,
    base_url: String,
    index: String,
    auth: Option<(String, String)>,
}

impl OpenSearchIndexer {
    /// Create an indexer from search configuration
    pub fn new(config: &SearchConfig, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        let auth = if config.user.is_empty() && config.password.is_empty() {
            None
        } else {
            Some((config.user.clone(), config.password.clone()))
        };

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            auth,
        }
    }

    fn doc_url(&self, item_id: Snowflake) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index, item_id)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request,
        }
    }

    fn document(item: &ItemSummary) -> serde_json::Value {
        json!({
            "id": item.id,
            "sku": item.sku,
            "name": item.name,
            "in_stock": item.quantity,
            "min_qty": item.min_quantity,
            "category": item.category,
        })
    }
}

#[async_trait]
impl SearchIndexer for OpenSearchIndexer {
    async fn ensure_index(&self) -> Result<(), DeliveryError> {
        let mapping = json!({
            "mappings": {
                "properties": {
                    "sku": {"type": "keyword"},
                    "name": {"type": "text"},
                    "in_stock": {"type": "integer"},
                    "min_qty": {"type": "integer"},
                    "category": {"type": "keyword"},
                }
            }
        });

        let url = format!("{}/{}", self.base_url, self.index);
        // 400 here means the index already exists; that is fine
        self.apply_auth(self.client.put(&url))
            .json(&mapping)
            .send()
            .await
            .map_err(|e| DeliveryError::new("opensearch", e.to_string()))?;

        Ok(())
    }

    async fn upsert(&self, item: &ItemSummary) -> Result<(), DeliveryError> {
        let response = self
            .apply_auth(self.client.put(self.doc_url(item.id)))
            .json(&Self::document(item))
            .send()
            .await
            .map_err(|e| DeliveryError::new("opensearch", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::new(
                "opensearch",
                format!("index responded with {}", response.status()),
            ));
        }

        Ok(())
    }

    async fn remove(&self, item_id: Snowflake) -> Result<(), DeliveryError> {
        let response = self
            .apply_auth(self.client.delete(self.doc_url(item_id)))
            .send()
            .await
            .map_err(|e| DeliveryError::new("opensearch", e.to_string()))?;

        // A missing document is already the desired outcome
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(DeliveryError::new(
                "opensearch",
                format!("index responded with {}", response.status()),
            ));
        }

        Ok(())
    }

    async fn reindex(&self, items: &[ItemSummary]) -> Result<usize, DeliveryError> {
        self.ensure_index().await?;

        let mut written = 0;
        for item in items {
            match self.upsert(item).await {
                Ok(()) => written += 1,
                Err(e) => {
                    tracing::warn!(item_id = %item.id, error = %e, "Reindex skipped item");
                }
            }
        }

        Ok(written)
    }
}

/// Indexer used when no OpenSearch cluster is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndexer;

#[async_trait]
impl SearchIndexer for NoopIndexer {
    async fn ensure_index(&self) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn upsert(&self, _item: &ItemSummary) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn remove(&self, _item_id: Snowflake) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn reindex(&self, _items: &[ItemSummary]) -> Result<usize, DeliveryError> {
        Ok(0)
    }
}

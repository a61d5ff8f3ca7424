//! Catalog service
//!
//! Item CRUD, gated on the catalog-manager roles. Retirement is the soft
//! delete of the catalog: a retired item disappears from listings but its
//! row survives while ledger entries or remaining stock reference it.
//! Every quantity mutation flows through the version-checked stock write
//! and is announced to the low-stock notifier; every save feeds the
//! search-index collaborator.

use tracing::{info, instrument};

use stockroom_core::entities::{Item, ItemStatus};
use stockroom_core::error::DomainError;
use stockroom_core::events::{ItemSummary, StockEvent};
use stockroom_core::traits::ItemQuery;
use stockroom_core::value_objects::Snowflake;

use crate::dto::{CreateItemRequest, ItemResponse, UpdateItemRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::{parse_id, Actor};

/// Catalog service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    /// Create a new CatalogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new item
    #[instrument(skip(self, request))]
    pub async fn create_item(
        &self,
        actor: Actor,
        request: CreateItemRequest,
    ) -> ServiceResult<ItemResponse> {
        actor.require_catalog_manager()?;

        let category_id = parse_id(&request.category_id, "category_id")?;
        let category = self
            .ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", request.category_id.clone()))?;

        if self.ctx.item_repo().sku_exists(&request.sku).await? {
            return Err(DomainError::SkuAlreadyExists(request.sku).into());
        }

        let mut item = Item::new(
            self.ctx.generate_id(),
            request.sku,
            request.name,
            request.quantity,
            category_id,
            Some(actor.user_id),
        );
        item.min_quantity = request.min_quantity;
        item.cost = request.cost;
        item.location = request.location;
        item.description = request.description;

        self.ctx.item_repo().create(&item).await?;

        info!(item_id = %item.id, sku = %item.sku, quantity = item.quantity, "Item created");

        let summary = ItemSummary::from_item(&item, &category.name);
        // An item born at or below its bar alerts immediately
        self.ctx.notifier().observe_created(&summary);
        self.ctx.spawn_index_upsert(summary);

        Ok(ItemResponse::from_item(&item, Some(&category)))
    }

    /// Get item by ID (any status, so historical ledger references resolve)
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: &str) -> ServiceResult<ItemResponse> {
        let id = parse_id(item_id, "item_id")?;
        let item = self
            .ctx
            .item_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))?;

        let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
        Ok(ItemResponse::from_item(&item, category.as_ref()))
    }

    /// List catalog items. Retired items are only visible to catalog
    /// managers who ask for them.
    #[instrument(skip(self, query))]
    pub async fn list_items(
        &self,
        actor: Actor,
        mut query: ItemQuery,
    ) -> ServiceResult<Vec<ItemResponse>> {
        if !actor.role.can_manage_catalog() {
            query.include_retired = false;
        }

        let items = self.ctx.item_repo().list(query).await?;

        // Resolve category names in one pass
        let categories = self.ctx.category_repo().list().await?;
        let responses = items
            .iter()
            .map(|item| {
                let category = categories.iter().find(|c| c.id == item.category_id);
                ItemResponse::from_item(item, category)
            })
            .collect();

        Ok(responses)
    }

    /// Update item metadata and, when requested, its stock on hand
    #[instrument(skip(self, request))]
    pub async fn update_item(
        &self,
        actor: Actor,
        item_id: &str,
        request: UpdateItemRequest,
    ) -> ServiceResult<ItemResponse> {
        actor.require_catalog_manager()?;

        let id = parse_id(item_id, "item_id")?;
        let mut item = self
            .ctx
            .item_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))?;

        if let Some(ref sku) = request.sku {
            if *sku != item.sku && self.ctx.item_repo().sku_exists(sku).await? {
                return Err(DomainError::SkuAlreadyExists(sku.clone()).into());
            }
            item.sku = sku.clone();
        }
        if let Some(name) = request.name {
            item.name = name;
        }
        if let Some(min_quantity) = request.min_quantity {
            item.min_quantity = min_quantity;
        }
        if let Some(cost) = request.cost {
            item.cost = Some(cost);
        }
        if let Some(location) = request.location {
            item.location = Some(location);
        }
        if let Some(description) = request.description {
            item.description = Some(description);
        }
        if let Some(ref category_id) = request.category_id {
            let parsed = parse_id(category_id, "category_id")?;
            self.ctx
                .category_repo()
                .find_by_id(parsed)
                .await?
                .ok_or_else(|| ServiceError::not_found("Category", category_id.clone()))?;
            item.category_id = parsed;
        }

        item.touch(Some(actor.user_id));
        self.ctx.item_repo().update(&item).await?;

        // Stock edits go through the compare-and-set write so a concurrent
        // commit or return cannot be silently overwritten
        if let Some(new_quantity) = request.quantity {
            if new_quantity != item.quantity {
                let previous = item.quantity;
                self.ctx
                    .item_repo()
                    .update_stock(item.id, item.version, new_quantity)
                    .await?;
                item.quantity = new_quantity;
                item.version += 1;

                let summary = self.summarize(&item).await?;
                self.ctx.notifier().observe(&StockEvent::quantity_changed(
                    summary,
                    previous,
                    new_quantity,
                    Some(actor.user_id),
                ));

                info!(item_id = %item.id, previous, current = new_quantity, "Stock adjusted");
            }
        }

        let summary = self.summarize(&item).await?;
        self.ctx.spawn_index_upsert(summary);

        let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
        Ok(ItemResponse::from_item(&item, category.as_ref()))
    }

    /// Retire an item (soft delete). Refused while stock remains unless
    /// `force` is set.
    #[instrument(skip(self))]
    pub async fn retire_item(
        &self,
        actor: Actor,
        item_id: &str,
        force: bool,
    ) -> ServiceResult<ItemResponse> {
        actor.require_catalog_manager()?;

        let id = parse_id(item_id, "item_id")?;
        let mut item = self
            .ctx
            .item_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))?;

        if item.status == ItemStatus::Retired {
            let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
            return Ok(ItemResponse::from_item(&item, category.as_ref()));
        }

        if item.quantity > 0 && !force {
            return Err(DomainError::StockStillOnHand {
                item_id: id,
                quantity: item.quantity,
            }
            .into());
        }

        item.retire(Some(actor.user_id));
        self.ctx.item_repo().update(&item).await?;

        info!(item_id = %id, "Item retired");

        let summary = self.summarize(&item).await?;
        self.ctx.spawn_index_upsert(summary);

        let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
        Ok(ItemResponse::from_item(&item, category.as_ref()))
    }

    /// Physically delete an item. Refused while stock remains or ledger
    /// entries still reference it; history is never destroyed.
    #[instrument(skip(self))]
    pub async fn purge_item(&self, actor: Actor, item_id: &str) -> ServiceResult<()> {
        actor.require_catalog_manager()?;

        let id = parse_id(item_id, "item_id")?;
        let item = self
            .ctx
            .item_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item", item_id))?;

        if item.quantity > 0 {
            return Err(DomainError::StockStillOnHand {
                item_id: id,
                quantity: item.quantity,
            }
            .into());
        }
        if self.ctx.ledger_repo().item_referenced(id).await? {
            return Err(DomainError::ItemReferencedByLedger(id).into());
        }

        self.ctx.item_repo().delete(id).await?;

        info!(item_id = %id, "Item purged");

        self.ctx.spawn_index_remove(id);

        Ok(())
    }

    /// Rebuild the search index over the whole catalog; returns the number
    /// of documents written. Admin only.
    #[instrument(skip(self))]
    pub async fn reindex(&self, actor: Actor) -> ServiceResult<usize> {
        if !actor.role.is_admin() {
            return Err(ServiceError::permission_denied(actor.role.as_str()));
        }

        let categories = self.ctx.category_repo().list().await?;
        let mut summaries = Vec::new();
        let mut before: Option<Snowflake> = None;

        loop {
            let page = self
                .ctx
                .item_repo()
                .list(ItemQuery {
                    before,
                    limit: 500,
                    include_retired: true,
                    ..ItemQuery::default()
                })
                .await?;
            let Some(last) = page.last() else {
                break;
            };
            before = Some(last.id);

            summaries.extend(page.iter().map(|item| {
                let name = categories
                    .iter()
                    .find(|c| c.id == item.category_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or_default();
                ItemSummary::from_item(item, name)
            }));
        }

        let written = self
            .ctx
            .indexer()
            .reindex(&summaries)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(written, "Catalog reindexed");

        Ok(written)
    }

    /// Build an event summary with the resolved category name
    async fn summarize(&self, item: &Item) -> ServiceResult<ItemSummary> {
        let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
        Ok(ItemSummary::from_item(
            item,
            category.map(|c| c.name).unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateCategoryRequest;
    use crate::services::{CategoryService, LowStockNotifier};
    use crate::testing::{test_context, test_context_with_notifier, RecordingSink};
    use std::sync::Arc;
    use std::time::Duration;
    use stockroom_common::AlertsConfig;
    use stockroom_core::value_objects::Role;

    fn manager() -> Actor {
        Actor::new(Snowflake::new(1), Role::Manager)
    }

    fn staff() -> Actor {
        Actor::new(Snowflake::new(2), Role::Staff)
    }

    async fn seed_category(ctx: &ServiceContext) -> String {
        CategoryService::new(ctx)
            .create(
                manager(),
                CreateCategoryRequest {
                    name: "Peripherals".to_string(),
                },
            )
            .await
            .unwrap()
            .id
    }

    fn item_request(sku: &str, quantity: i64, category_id: &str) -> CreateItemRequest {
        CreateItemRequest {
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            quantity,
            min_quantity: 0,
            cost: None,
            location: None,
            description: None,
            category_id: category_id.to_string(),
        }
    }

    async fn wait_for_alerts(sink: &RecordingSink, count: usize) {
        for _ in 0..100 {
            if sink.delivered().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    #[tokio::test]
    async fn test_create_and_get_item() {
        let ctx = test_context();
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        let created = service
            .create_item(manager(), item_request("WM-0042", 25, &category_id))
            .await
            .unwrap();
        assert_eq!(created.quantity, 25);
        assert_eq!(created.category.as_ref().unwrap().name, "Peripherals");

        let fetched = service.get_item(&created.id).await.unwrap();
        assert_eq!(fetched.sku, "WM-0042");
    }

    #[tokio::test]
    async fn test_staff_cannot_create_item() {
        let ctx = test_context();
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        let result = service
            .create_item(staff(), item_request("WM-0042", 25, &category_id))
            .await;
        assert!(matches!(result, Err(ServiceError::PermissionDenied { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let ctx = test_context();
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        service
            .create_item(manager(), item_request("WM-0042", 25, &category_id))
            .await
            .unwrap();
        let result = service
            .create_item(manager(), item_request("WM-0042", 5, &category_id))
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::SkuAlreadyExists(_)))
        ));
    }

    #[tokio::test]
    async fn test_creation_below_bar_alerts_once() {
        let sink = Arc::new(RecordingSink::default());
        let notifier =
            LowStockNotifier::new(&AlertsConfig::default()).with_sink(sink.clone());
        let ctx = test_context_with_notifier(notifier);
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        // Quantity 5 is below the default bar of 10
        service
            .create_item(manager(), item_request("WM-0042", 5, &category_id))
            .await
            .unwrap();
        wait_for_alerts(&sink, 1).await;

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].in_stock, 5);

        // A comfortable quantity does not alert
        service
            .create_item(manager(), item_request("KB-0007", 50, &category_id))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(sink.delivered().len(), 1);
    }

    #[tokio::test]
    async fn test_stock_edit_fires_crossing_alert() {
        let sink = Arc::new(RecordingSink::default());
        let notifier =
            LowStockNotifier::new(&AlertsConfig::default()).with_sink(sink.clone());
        let ctx = test_context_with_notifier(notifier);
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        let created = service
            .create_item(manager(), item_request("WM-0042", 11, &category_id))
            .await
            .unwrap();

        let updated = service
            .update_item(
                manager(),
                &created.id,
                UpdateItemRequest {
                    quantity: Some(9),
                    ..UpdateItemRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 9);

        wait_for_alerts(&sink, 1).await;
        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].in_stock, 9);
        assert_eq!(delivered[0].min_qty, 10);
    }

    #[tokio::test]
    async fn test_retire_blocked_while_stock_remains() {
        let ctx = test_context();
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        let created = service
            .create_item(manager(), item_request("WM-0042", 3, &category_id))
            .await
            .unwrap();

        let result = service.retire_item(manager(), &created.id, false).await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::StockStillOnHand { .. }))
        ));

        // The override flag forces retirement with stock on hand
        let retired = service.retire_item(manager(), &created.id, true).await.unwrap();
        assert_eq!(retired.status, "retired");
    }

    #[tokio::test]
    async fn test_retired_items_hidden_from_staff_listings() {
        let ctx = test_context();
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        let created = service
            .create_item(manager(), item_request("WM-0042", 0, &category_id))
            .await
            .unwrap();
        service
            .create_item(manager(), item_request("KB-0007", 4, &category_id))
            .await
            .unwrap();
        service.retire_item(manager(), &created.id, false).await.unwrap();

        let query = ItemQuery {
            limit: 50,
            include_retired: true,
            ..ItemQuery::default()
        };
        // Staff asking for retired items still only sees active ones
        let listed = service.list_items(staff(), query.clone()).await.unwrap();
        assert_eq!(listed.len(), 1);

        let listed = service.list_items(manager(), query).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_purge_guards() {
        let ctx = test_context();
        let category_id = seed_category(&ctx).await;
        let service = CatalogService::new(&ctx);

        let created = service
            .create_item(manager(), item_request("WM-0042", 2, &category_id))
            .await
            .unwrap();

        let result = service.purge_item(manager(), &created.id).await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::StockStillOnHand { .. }))
        ));

        service
            .update_item(
                manager(),
                &created.id,
                UpdateItemRequest {
                    quantity: Some(0),
                    ..UpdateItemRequest::default()
                },
            )
            .await
            .unwrap();
        service.purge_item(manager(), &created.id).await.unwrap();
        assert!(service.get_item(&created.id).await.is_err());
    }
}

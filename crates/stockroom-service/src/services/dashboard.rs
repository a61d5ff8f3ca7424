//! Dashboard service
//!
//! Aggregate numbers and a recent-activity feed for the ops dashboard.

use chrono::Duration;
use tracing::instrument;

use stockroom_core::entities::{Item, ItemStatus};

use crate::dto::{ActivityResponse, DashboardStatsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new DashboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregate catalog numbers
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<DashboardStatsResponse> {
        let bar = self.ctx.notifier().default_bar();
        let stats = self.ctx.item_repo().stats(bar).await?;
        let categories = self.ctx.category_repo().count().await?;

        Ok(DashboardStatsResponse {
            total_items: stats.total_items,
            low_stock: stats.low_stock,
            out_of_stock: stats.out_of_stock,
            inventory_value: stats.inventory_value,
            new_items_7d: stats.new_items_7d,
            categories,
        })
    }

    /// Latest catalog movements, newest first
    #[instrument(skip(self))]
    pub async fn recent_activity(&self, limit: i64) -> ServiceResult<Vec<ActivityResponse>> {
        let items = self.ctx.item_repo().recent(limit.clamp(1, 50)).await?;

        let mut responses = Vec::with_capacity(items.len());
        for item in &items {
            let action = Self::classify(item);
            let user = match item.updated_by.or(item.created_by) {
                Some(id) => self
                    .ctx
                    .user_repo()
                    .find_by_id(id)
                    .await?
                    .map(|u| u.username),
                None => None,
            };

            responses.push(ActivityResponse {
                id: item.id.to_string(),
                name: item.name.clone(),
                action: action.to_string(),
                summary: match action {
                    "retired" => "Removed from inventory".to_string(),
                    "created" => "New item added".to_string(),
                    _ => "Details updated".to_string(),
                },
                user,
                timestamp: item.updated_at,
            });
        }

        Ok(responses)
    }

    /// Classify an item's latest movement from its timestamps and status
    fn classify(item: &Item) -> &'static str {
        if item.status == ItemStatus::Retired {
            "retired"
        } else if item.updated_at - item.created_at < Duration::minutes(1) {
            "created"
        } else {
            "updated"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateCategoryRequest, CreateItemRequest};
    use crate::services::{Actor, CatalogService, CategoryService};
    use crate::testing::test_context;
    use rust_decimal::Decimal;
    use stockroom_core::value_objects::{Role, Snowflake};

    fn manager() -> Actor {
        Actor::new(Snowflake::new(1), Role::Manager)
    }

    async fn seed_item(
        ctx: &ServiceContext,
        sku: &str,
        quantity: i64,
        cost: Option<Decimal>,
    ) -> String {
        let category = CategoryService::new(ctx)
            .create(
                manager(),
                CreateCategoryRequest {
                    name: format!("Category {sku}"),
                },
            )
            .await
            .unwrap();
        CatalogService::new(ctx)
            .create_item(
                manager(),
                CreateItemRequest {
                    sku: sku.to_string(),
                    name: format!("Item {sku}"),
                    quantity,
                    min_quantity: 0,
                    cost,
                    location: None,
                    description: None,
                    category_id: category.id,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_stats_counts_and_value() {
        let ctx = test_context();
        seed_item(&ctx, "WM-0042", 25, Some(Decimal::new(1050, 2))).await; // 25 * 10.50
        seed_item(&ctx, "KB-0007", 4, None).await; // low stock
        seed_item(&ctx, "CB-0001", 0, None).await; // out of stock

        let stats = DashboardService::new(&ctx).stats().await.unwrap();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.inventory_value, Decimal::new(26250, 2));
        assert_eq!(stats.new_items_7d, 3);
        assert_eq!(stats.categories, 3);
    }

    #[tokio::test]
    async fn test_retired_items_drop_out_of_stats() {
        let ctx = test_context();
        let item_id = seed_item(&ctx, "WM-0042", 0, None).await;
        CatalogService::new(&ctx)
            .retire_item(manager(), &item_id, false)
            .await
            .unwrap();

        let stats = DashboardService::new(&ctx).stats().await.unwrap();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.out_of_stock, 0);
    }

    #[tokio::test]
    async fn test_recent_activity_classification() {
        let ctx = test_context();
        let created = seed_item(&ctx, "WM-0042", 5, None).await;
        let retired = seed_item(&ctx, "KB-0007", 0, None).await;
        CatalogService::new(&ctx)
            .retire_item(manager(), &retired, false)
            .await
            .unwrap();

        let activity = DashboardService::new(&ctx).recent_activity(10).await.unwrap();
        assert_eq!(activity.len(), 2);

        let find = |id: &str| activity.iter().find(|a| a.id == id).unwrap();
        assert_eq!(find(&created).action, "created");
        assert_eq!(find(&retired).action, "retired");
    }
}

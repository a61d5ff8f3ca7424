//! PostgreSQL implementation of ItemRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use stockroom_core::entities::Item;
use stockroom_core::error::DomainError;
use stockroom_core::traits::{CatalogStats, ItemQuery, ItemRepository, RepoResult};
use stockroom_core::value_objects::Snowflake;

use crate::models::ItemModel;

use super::error::{item_not_found, map_db_error, map_fk_violation, map_unique_violation};

const ITEM_COLUMNS: &str = "id, sku, name, quantity, min_quantity, cost, location, description, \
                            category_id, status, version, created_at, updated_at, created_by, updated_by";

/// PostgreSQL implementation of ItemRepository
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    /// Create a new PgItemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape for the aggregate stats query
#[derive(Debug, FromRow)]
struct StatsRow {
    total_items: i64,
    low_stock: i64,
    out_of_stock: i64,
    inventory_value: Decimal,
    new_items_7d: i64,
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Item>> {
        let result = sqlx::query_as::<_, ItemModel>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Item>> {
        let result = sqlx::query_as::<_, ItemModel>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE sku = $1"
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn sku_exists(&self, sku: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM items WHERE sku = $1)",
        )
        .bind(sku)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ItemQuery) -> RepoResult<Vec<Item>> {
        let results = sqlx::query_as::<_, ItemModel>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            WHERE ($1 OR status = 'active')
              AND ($2::bigint IS NULL OR category_id = $2)
              AND ($3::bigint IS NULL OR id < $3)
              AND ($4::bigint IS NULL OR id > $4)
            ORDER BY id DESC
            LIMIT $5
            "#
        ))
        .bind(query.include_retired)
        .bind(query.category_id.map(Snowflake::into_inner))
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.after.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self, item))]
    async fn create(&self, item: &Item) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO items (id, sku, name, quantity, min_quantity, cost, location, description,
                               category_id, status, version, created_at, updated_at, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(item.id.into_inner())
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.min_quantity)
        .bind(item.cost)
        .bind(&item.location)
        .bind(&item.description)
        .bind(item.category_id.into_inner())
        .bind(item.status.as_str())
        .bind(item.version)
        .bind(item.created_at)
        .bind(item.updated_at)
        .bind(item.created_by.map(Snowflake::into_inner))
        .bind(item.updated_by.map(Snowflake::into_inner))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SkuAlreadyExists(item.sku.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, item))]
    async fn update(&self, item: &Item) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET sku = $2, name = $3, min_quantity = $4, cost = $5, location = $6,
                description = $7, category_id = $8, status = $9, updated_at = NOW(),
                updated_by = $10
            WHERE id = $1
            "#,
        )
        .bind(item.id.into_inner())
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.min_quantity)
        .bind(item.cost)
        .bind(&item.location)
        .bind(&item.description)
        .bind(item.category_id.into_inner())
        .bind(item.status.as_str())
        .bind(item.updated_by.map(Snowflake::into_inner))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SkuAlreadyExists(item.sku.clone())))?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(item.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_stock(
        &self,
        id: Snowflake,
        expected_version: i32,
        new_quantity: i64,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET quantity = $3, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(expected_version)
        .bind(new_quantity)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Zero rows means either the item vanished or another writer
            // bumped the version first; tell the two apart for the caller.
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM items WHERE id = $1)",
            )
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

            return if exists {
                Err(DomainError::Conflict(id))
            } else {
                Err(item_not_found(id))
            };
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || DomainError::ItemReferencedByLedger(id)))?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn stats(&self, default_bar: i64) -> RepoResult<CatalogStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total_items,
                COUNT(*) FILTER (
                    WHERE quantity > 0
                      AND quantity <= CASE WHEN min_quantity > 0 THEN min_quantity ELSE $1 END
                ) AS low_stock,
                COUNT(*) FILTER (WHERE quantity <= 0) AS out_of_stock,
                COALESCE(SUM(quantity * cost) FILTER (WHERE cost IS NOT NULL), 0) AS inventory_value,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days') AS new_items_7d
            FROM items
            WHERE status = 'active'
            "#,
        )
        .bind(default_bar)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(CatalogStats {
            total_items: row.total_items,
            low_stock: row.low_stock,
            out_of_stock: row.out_of_stock,
            inventory_value: row.inventory_value,
            new_items_7d: row.new_items_7d,
        })
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepoResult<Vec<Item>> {
        let results = sqlx::query_as::<_, ItemModel>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY updated_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Item::from).collect())
    }
}

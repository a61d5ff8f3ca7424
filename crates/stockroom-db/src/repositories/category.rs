//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use stockroom_core::entities::ItemCategory;
use stockroom_core::error::DomainError;
use stockroom_core::traits::{CategoryRepository, RepoResult};
use stockroom_core::value_objects::Snowflake;

use crate::models::CategoryModel;

use super::error::{category_not_found, map_db_error, map_fk_violation, map_unique_violation};

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ItemCategory>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            "SELECT id, name, created_at FROM item_categories WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ItemCategory::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ItemCategory>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            "SELECT id, name, created_at FROM item_categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ItemCategory::from))
    }

    #[instrument(skip(self))]
    async fn name_exists(&self, name: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM item_categories WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<ItemCategory>> {
        let results = sqlx::query_as::<_, CategoryModel>(
            "SELECT id, name, created_at FROM item_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ItemCategory::from).collect())
    }

    #[instrument(skip(self, category))]
    async fn create(&self, category: &ItemCategory) -> RepoResult<()> {
        sqlx::query("INSERT INTO item_categories (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(category.id.into_inner())
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, || {
                    DomainError::CategoryAlreadyExists(category.name.clone())
                })
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn rename(&self, id: Snowflake, name: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE item_categories SET name = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, || DomainError::CategoryAlreadyExists(name.to_string()))
            })?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // The FK from items is RESTRICT; a violation means the category is
        // still referenced.
        let result = sqlx::query("DELETE FROM item_categories WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || DomainError::CategoryInUse(id)))?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM item_categories")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}

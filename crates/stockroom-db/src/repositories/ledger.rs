//! PostgreSQL implementation of LedgerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use stockroom_core::entities::LedgerEntry;
use stockroom_core::traits::{LedgerRepository, RepoResult};
use stockroom_core::value_objects::Snowflake;

use crate::models::LedgerEntryModel;

use super::error::{ledger_entry_not_found, map_db_error};

/// PostgreSQL implementation of LedgerRepository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    /// Create a new PgLedgerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        borrower_id: Snowflake,
        item_id: Snowflake,
    ) -> RepoResult<Option<LedgerEntry>> {
        let result = sqlx::query_as::<_, LedgerEntryModel>(
            "SELECT id, borrower_id, item_id, quantity, created_at, updated_at \
             FROM ledger_entries WHERE borrower_id = $1 AND item_id = $2",
        )
        .bind(borrower_id.into_inner())
        .bind(item_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LedgerEntry::from))
    }

    #[instrument(skip(self))]
    async fn find_by_borrower(&self, borrower_id: Snowflake) -> RepoResult<Vec<LedgerEntry>> {
        let results = sqlx::query_as::<_, LedgerEntryModel>(
            "SELECT id, borrower_id, item_id, quantity, created_at, updated_at \
             FROM ledger_entries WHERE borrower_id = $1 ORDER BY created_at",
        )
        .bind(borrower_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LedgerEntry::from).collect())
    }

    #[instrument(skip(self, entry))]
    async fn create(&self, entry: &LedgerEntry) -> RepoResult<()> {
        // One entry per (borrower, item): a concurrent commit for the same
        // pair folds its quantity into the existing entry.
        sqlx::query(
            r#"
            INSERT INTO ledger_entries (id, borrower_id, item_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (borrower_id, item_id)
            DO UPDATE SET quantity = ledger_entries.quantity + EXCLUDED.quantity,
                          updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(entry.id.into_inner())
        .bind(entry.borrower_id.into_inner())
        .bind(entry.item_id.into_inner())
        .bind(entry.quantity)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_quantity(&self, entry_id: Snowflake, quantity: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE ledger_entries SET quantity = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(entry_id.into_inner())
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(ledger_entry_not_found(entry_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, entry_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM ledger_entries WHERE id = $1")
            .bind(entry_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(ledger_entry_not_found(entry_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn item_referenced(&self, item_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ledger_entries WHERE item_id = $1)",
        )
        .bind(item_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }
}

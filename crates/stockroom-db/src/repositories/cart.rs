//! PostgreSQL implementation of CartRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use stockroom_core::entities::{Cart, CartLine};
use stockroom_core::traits::{CartRepository, RepoResult};
use stockroom_core::value_objects::Snowflake;

use crate::models::{CartLineModel, CartModel};

use super::error::{cart_line_not_found, map_db_error};

/// PostgreSQL implementation of CartRepository
#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    /// Create a new PgCartRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Cart>> {
        let result = sqlx::query_as::<_, CartModel>(
            "SELECT id, user_id, created_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Cart::from))
    }

    #[instrument(skip(self, cart))]
    async fn create(&self, cart: &Cart) -> RepoResult<()> {
        // Carts are created lazily; a concurrent first access may have won
        // the race, in which case the existing row is the one that counts.
        sqlx::query(
            "INSERT INTO carts (id, user_id, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(cart.id.into_inner())
        .bind(cart.user_id.into_inner())
        .bind(cart.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn lines(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>> {
        let results = sqlx::query_as::<_, CartLineModel>(
            "SELECT id, cart_id, item_id, quantity, added_at FROM cart_lines \
             WHERE cart_id = $1 ORDER BY added_at",
        )
        .bind(cart_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CartLine::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_line(
        &self,
        cart_id: Snowflake,
        item_id: Snowflake,
    ) -> RepoResult<Option<CartLine>> {
        let result = sqlx::query_as::<_, CartLineModel>(
            "SELECT id, cart_id, item_id, quantity, added_at FROM cart_lines \
             WHERE cart_id = $1 AND item_id = $2",
        )
        .bind(cart_id.into_inner())
        .bind(item_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CartLine::from))
    }

    #[instrument(skip(self, line))]
    async fn create_line(&self, line: &CartLine) -> RepoResult<()> {
        // One line per (cart, item): a concurrent add for the same item
        // folds into the existing line instead of violating the constraint.
        sqlx::query(
            r#"
            INSERT INTO cart_lines (id, cart_id, item_id, quantity, added_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (cart_id, item_id)
            DO UPDATE SET quantity = cart_lines.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(line.id.into_inner())
        .bind(line.cart_id.into_inner())
        .bind(line.item_id.into_inner())
        .bind(line.quantity)
        .bind(line.added_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_line_quantity(&self, line_id: Snowflake, quantity: i64) -> RepoResult<()> {
        let result = sqlx::query("UPDATE cart_lines SET quantity = $2 WHERE id = $1")
            .bind(line_id.into_inner())
            .bind(quantity)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(cart_line_not_found(line_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_line(&self, cart_id: Snowflake, item_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM cart_lines WHERE cart_id = $1 AND item_id = $2")
            .bind(cart_id.into_inner())
            .bind(item_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn clear(&self, cart_id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM cart_lines WHERE cart_id = $1")
            .bind(cart_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

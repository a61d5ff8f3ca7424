//! Checkout service - cart commitment
//!
//! Commitment transfers each cart line's quantity from the catalog into
//! the user's personal inventory ledger. Lines are processed
//! independently: one line failing its stock check (or losing a
//! concurrent-write race) does not roll back the others. The caller gets
//! a report listing both outcomes.

use tracing::{info, instrument, warn};

use stockroom_core::entities::{CartLine, LedgerEntry};
use stockroom_core::error::DomainError;
use stockroom_core::events::{ItemSummary, StockEvent};
use stockroom_core::value_objects::Snowflake;

use crate::dto::{CommitReportResponse, CommittedLineResponse, FailedLineResponse};

use super::cart::CartService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::Actor;

/// Checkout service
pub struct CheckoutService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CheckoutService<'a> {
    /// Create a new CheckoutService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Commit the actor's cart line by line
    #[instrument(skip(self))]
    pub async fn commit_cart(&self, actor: Actor) -> ServiceResult<CommitReportResponse> {
        let cart = CartService::new(self.ctx).get_or_create_cart(actor).await?;
        let lines = self.ctx.cart_repo().lines(cart.id).await?;

        let mut report = CommitReportResponse {
            committed: Vec::new(),
            failed: Vec::new(),
        };

        for line in lines {
            match self.commit_line(actor, &line).await {
                Ok(remaining_stock) => {
                    report.committed.push(CommittedLineResponse {
                        item_id: line.item_id.to_string(),
                        quantity: line.quantity,
                        remaining_stock,
                    });
                }
                Err(e) => {
                    warn!(item_id = %line.item_id, error = %e, "Cart line failed to commit");
                    report.failed.push(FailedLineResponse {
                        item_id: line.item_id.to_string(),
                        quantity: line.quantity,
                        code: e.code().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            user_id = %actor.user_id,
            committed = report.committed.len(),
            failed = report.failed.len(),
            "Cart committed"
        );

        Ok(report)
    }

    /// Commit one line; returns the catalog stock remaining afterwards.
    ///
    /// The stock decrement runs first: it is the compare-and-set that
    /// serializes against concurrent writers, and failing it leaves
    /// nothing to undo. Only then is the ledger credited and the line
    /// removed.
    async fn commit_line(&self, actor: Actor, line: &CartLine) -> Result<i64, DomainError> {
        let item = self
            .ctx
            .item_repo()
            .find_by_id(line.item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(line.item_id))?;

        if !item.is_active() {
            return Err(DomainError::ItemRetired);
        }
        if item.quantity < line.quantity {
            return Err(DomainError::InsufficientStock {
                item_id: item.id,
                requested: line.quantity,
                available: item.quantity,
            });
        }

        let remaining = item.quantity - line.quantity;
        self.ctx
            .item_repo()
            .update_stock(item.id, item.version, remaining)
            .await?;

        self.upsert_ledger(actor.user_id, item.id, line.quantity).await?;
        self.ctx.cart_repo().delete_line(line.cart_id, line.item_id).await?;

        let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
        let mut summary =
            ItemSummary::from_item(&item, category.map(|c| c.name).unwrap_or_default());
        summary.quantity = remaining;
        self.ctx.notifier().observe(&StockEvent::quantity_changed(
            summary,
            item.quantity,
            remaining,
            Some(actor.user_id),
        ));

        Ok(remaining)
    }

    /// Add quantity to the (borrower, item) ledger entry, creating it on
    /// first borrow
    async fn upsert_ledger(
        &self,
        borrower_id: Snowflake,
        item_id: Snowflake,
        quantity: i64,
    ) -> Result<(), DomainError> {
        match self.ctx.ledger_repo().find(borrower_id, item_id).await? {
            Some(entry) => {
                self.ctx
                    .ledger_repo()
                    .set_quantity(entry.id, entry.quantity + quantity)
                    .await
            }
            None => {
                let entry =
                    LedgerEntry::new(self.ctx.generate_id(), borrower_id, item_id, quantity);
                self.ctx.ledger_repo().create(&entry).await
            }
        }
    }
}

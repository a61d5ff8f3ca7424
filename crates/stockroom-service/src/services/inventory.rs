//! Inventory service - the personal ledger and returns
//!
//! Returning is the exact inverse of commitment: the ledger entry is
//! drained (deleted at zero) and the catalog stock restored through the
//! same version-checked write the commit path uses.

use tracing::{info, instrument};

use stockroom_core::error::DomainError;
use stockroom_core::events::{ItemSummary, StockEvent};

use crate::dto::{ItemSlimResponse, LedgerEntryResponse, ReturnItemRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::{parse_id, Actor};

/// Inventory service
pub struct InventoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InventoryService<'a> {
    /// Create a new InventoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List everything the actor currently has checked out
    #[instrument(skip(self))]
    pub async fn list_inventory(&self, actor: Actor) -> ServiceResult<Vec<LedgerEntryResponse>> {
        let entries = self.ctx.ledger_repo().find_by_borrower(actor.user_id).await?;

        let mut responses = Vec::with_capacity(entries.len());
        for entry in &entries {
            let item = self
                .ctx
                .item_repo()
                .find_by_id(entry.item_id)
                .await?
                .ok_or(DomainError::ItemNotFound(entry.item_id))?;
            responses.push(LedgerEntryResponse {
                item: ItemSlimResponse::from(&item),
                quantity: entry.quantity,
                borrowed_at: entry.created_at,
                updated_at: entry.updated_at,
            });
        }

        Ok(responses)
    }

    /// Return borrowed quantity to the catalog
    #[instrument(skip(self, request))]
    pub async fn return_item(
        &self,
        actor: Actor,
        item_id: &str,
        request: ReturnItemRequest,
    ) -> ServiceResult<Vec<LedgerEntryResponse>> {
        if request.quantity < 1 {
            return Err(DomainError::QuantityTooSmall.into());
        }

        let id = parse_id(item_id, "item_id")?;
        let entry = self
            .ctx
            .ledger_repo()
            .find(actor.user_id, id)
            .await?
            .ok_or(DomainError::LedgerEntryNotFound(id))?;

        if !entry.can_return(request.quantity) {
            return Err(DomainError::InsufficientQuantity {
                item_id: id,
                requested: request.quantity,
                held: entry.quantity,
            }
            .into());
        }

        let item = self
            .ctx
            .item_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ItemNotFound(id))?;

        // Restore catalog stock first: the compare-and-set is the write
        // that can lose a race, and failing it leaves nothing to undo
        let restored = item.quantity + request.quantity;
        self.ctx
            .item_repo()
            .update_stock(item.id, item.version, restored)
            .await?;

        let remaining = entry.quantity - request.quantity;
        if remaining == 0 {
            self.ctx.ledger_repo().delete(entry.id).await?;
        } else {
            self.ctx.ledger_repo().set_quantity(entry.id, remaining).await?;
        }

        info!(
            user_id = %actor.user_id,
            item_id = %id,
            returned = request.quantity,
            remaining_borrowed = remaining,
            "Items returned"
        );

        let category = self.ctx.category_repo().find_by_id(item.category_id).await?;
        let mut summary =
            ItemSummary::from_item(&item, category.map(|c| c.name).unwrap_or_default());
        summary.quantity = restored;
        self.ctx.notifier().observe(&StockEvent::quantity_changed(
            summary,
            item.quantity,
            restored,
            Some(actor.user_id),
        ));

        self.list_inventory(actor).await
    }
}

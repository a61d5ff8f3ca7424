//! Ledger entry entity <-> model mapper

use stockroom_core::entities::LedgerEntry;
use stockroom_core::value_objects::Snowflake;

use crate::models::LedgerEntryModel;

impl From<LedgerEntryModel> for LedgerEntry {
    fn from(model: LedgerEntryModel) -> Self {
        LedgerEntry {
            id: Snowflake::new(model.id),
            borrower_id: Snowflake::new(model.borrower_id),
            item_id: Snowflake::new(model.item_id),
            quantity: model.quantity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

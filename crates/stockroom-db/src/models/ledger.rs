//! Ledger entry database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the ledger_entries table
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryModel {
    pub id: i64,
    pub borrower_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

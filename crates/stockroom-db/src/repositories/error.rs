//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use stockroom_core::error::DomainError;
use stockroom_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for foreign-key violation and return appropriate error or fallback
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create an "item not found" error
pub fn item_not_found(id: Snowflake) -> DomainError {
    DomainError::ItemNotFound(id)
}

/// Create a "category not found" error
pub fn category_not_found(id: Snowflake) -> DomainError {
    DomainError::CategoryNotFound(id)
}

/// Create a "cart line not found" error
pub fn cart_line_not_found(item_id: Snowflake) -> DomainError {
    DomainError::CartLineNotFound(item_id)
}

/// Create a "ledger entry not found" error
pub fn ledger_entry_not_found(id: Snowflake) -> DomainError {
    DomainError::LedgerEntryNotFound(id)
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

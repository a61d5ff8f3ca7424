//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Item not found: {0}")]
    ItemNotFound(Snowflake),

    #[error("Category not found: {0}")]
    CategoryNotFound(Snowflake),

    #[error("Item not found in cart: {0}")]
    CartLineNotFound(Snowflake),

    #[error("Item not found in inventory: {0}")]
    LedgerEntryNotFound(Snowflake),

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Quantity must be at least 1")]
    QuantityTooSmall,

    #[error("Item is retired and cannot be used")]
    ItemRetired,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Role {0} may not manage the catalog")]
    MissingRole(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Insufficient stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: Snowflake,
        requested: i64,
        available: i64,
    },

    #[error("Insufficient quantity in inventory for item {item_id}: requested {requested}, held {held}")]
    InsufficientQuantity {
        item_id: Snowflake,
        requested: i64,
        held: i64,
    },

    #[error("Item {item_id} still has {quantity} units on hand")]
    StockStillOnHand { item_id: Snowflake, quantity: i64 },

    #[error("Category {0} is still referenced by items")]
    CategoryInUse(Snowflake),

    #[error("Item {0} is referenced by inventory ledger entries")]
    ItemReferencedByLedger(Snowflake),

    #[error("SKU already exists: {0}")]
    SkuAlreadyExists(String),

    #[error("Category name already exists: {0}")]
    CategoryAlreadyExists(String),

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Concurrent update detected for item {0}")]
    Conflict(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ItemNotFound(_) => "UNKNOWN_ITEM",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::CartLineNotFound(_) => "UNKNOWN_CART_LINE",
            Self::LedgerEntryNotFound(_) => "UNKNOWN_LEDGER_ENTRY",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::QuantityTooSmall => "QUANTITY_TOO_SMALL",
            Self::ItemRetired => "ITEM_RETIRED",

            // Authorization
            Self::MissingRole(_) => "MISSING_ROLE",

            // Conflict
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::InsufficientQuantity { .. } => "INSUFFICIENT_QUANTITY",
            Self::StockStillOnHand { .. } => "STOCK_STILL_ON_HAND",
            Self::CategoryInUse(_) => "CATEGORY_IN_USE",
            Self::ItemReferencedByLedger(_) => "ITEM_REFERENCED_BY_LEDGER",
            Self::SkuAlreadyExists(_) => "SKU_ALREADY_EXISTS",
            Self::CategoryAlreadyExists(_) => "CATEGORY_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::CartLineNotFound(_)
                | Self::LedgerEntryNotFound(_)
                | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::QuantityTooSmall | Self::ItemRetired
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingRole(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::InsufficientStock { .. }
                | Self::InsufficientQuantity { .. }
                | Self::StockStillOnHand { .. }
                | Self::CategoryInUse(_)
                | Self::ItemReferencedByLedger(_)
                | Self::SkuAlreadyExists(_)
                | Self::CategoryAlreadyExists(_)
                | Self::EmailAlreadyExists
                | Self::Conflict(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ItemNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_ITEM");

        let err = DomainError::InsufficientStock {
            item_id: Snowflake::new(1),
            requested: 5,
            available: 2,
        };
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::ItemNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::MissingRole("STAFF".to_string()).is_authorization());
        assert!(DomainError::QuantityTooSmall.is_validation());
        assert!(DomainError::Conflict(Snowflake::new(1)).is_conflict());
        assert!(!DomainError::Conflict(Snowflake::new(1)).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InsufficientStock {
            item_id: Snowflake::new(42),
            requested: 10,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for item 42: requested 10, available 3"
        );

        let err = DomainError::StockStillOnHand {
            item_id: Snowflake::new(7),
            quantity: 4,
        };
        assert_eq!(err.to_string(), "Item 7 still has 4 units on hand");
    }
}

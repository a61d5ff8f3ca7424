//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::entities::{Cart, CartLine, Item, ItemCategory, LedgerEntry, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Item Repository
// ============================================================================

/// Pagination and filter options for catalog listings
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
    /// Include Retired items (admin listings only)
    pub include_retired: bool,
    pub category_id: Option<Snowflake>,
}

/// Item-side aggregates for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_items: i64,
    pub low_stock: i64,
    pub out_of_stock: i64,
    /// Sum of quantity * cost over active items with a known cost
    pub inventory_value: Decimal,
    pub new_items_7d: i64,
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find item by ID (any status)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Item>>;

    /// Find item by SKU (any status)
    async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Item>>;

    /// Check if a SKU is already taken
    async fn sku_exists(&self, sku: &str) -> RepoResult<bool>;

    /// List items with pagination; Retired items only when the query asks
    async fn list(&self, query: ItemQuery) -> RepoResult<Vec<Item>>;

    /// Create a new item
    async fn create(&self, item: &Item) -> RepoResult<()>;

    /// Update item metadata and status. Does not touch `quantity` or
    /// `version`; stock writes go through [`Self::update_stock`].
    async fn update(&self, item: &Item) -> RepoResult<()>;

    /// Compare-and-set stock write: persists `new_quantity` and bumps the
    /// version only if the stored version still equals `expected_version`.
    /// Fails with `DomainError::Conflict` when another writer got there
    /// first, so callers never lose an update.
    async fn update_stock(
        &self,
        id: Snowflake,
        expected_version: i32,
        new_quantity: i64,
    ) -> RepoResult<()>;

    /// Physically remove an item row
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Aggregate counts and value over active items. `default_bar` is the
    /// low-stock threshold applied to items without a per-item bar.
    async fn stats(&self, default_bar: i64) -> RepoResult<CatalogStats>;

    /// Most recently touched items, newest first
    async fn recent(&self, limit: i64) -> RepoResult<Vec<Item>>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ItemCategory>>;

    /// Find category by unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ItemCategory>>;

    /// Check if a name is already taken
    async fn name_exists(&self, name: &str) -> RepoResult<bool>;

    /// List all categories ordered by name
    async fn list(&self) -> RepoResult<Vec<ItemCategory>>;

    /// Create a new category
    async fn create(&self, category: &ItemCategory) -> RepoResult<()>;

    /// Rename a category
    async fn rename(&self, id: Snowflake, name: &str) -> RepoResult<()>;

    /// Delete a category. Fails with `CategoryInUse` while items reference it.
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Total category count
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Cart Repository
// ============================================================================

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find a user's cart
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Cart>>;

    /// Create a cart (carts are created lazily, one per user)
    async fn create(&self, cart: &Cart) -> RepoResult<()>;

    /// All lines of a cart, oldest first
    async fn lines(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>>;

    /// Find the line for a specific item
    async fn find_line(&self, cart_id: Snowflake, item_id: Snowflake)
        -> RepoResult<Option<CartLine>>;

    /// Create a new line
    async fn create_line(&self, line: &CartLine) -> RepoResult<()>;

    /// Overwrite a line's quantity
    async fn set_line_quantity(&self, line_id: Snowflake, quantity: i64) -> RepoResult<()>;

    /// Delete the line for an item; returns whether a line existed
    async fn delete_line(&self, cart_id: Snowflake, item_id: Snowflake) -> RepoResult<bool>;

    /// Delete every line of a cart
    async fn clear(&self, cart_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Ledger Repository
// ============================================================================

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Find the entry for a (borrower, item) pair
    async fn find(&self, borrower_id: Snowflake, item_id: Snowflake)
        -> RepoResult<Option<LedgerEntry>>;

    /// All entries held by a borrower
    async fn find_by_borrower(&self, borrower_id: Snowflake) -> RepoResult<Vec<LedgerEntry>>;

    /// Create a new entry
    async fn create(&self, entry: &LedgerEntry) -> RepoResult<()>;

    /// Overwrite an entry's quantity
    async fn set_quantity(&self, entry_id: Snowflake, quantity: i64) -> RepoResult<()>;

    /// Delete an entry (its quantity reached zero)
    async fn delete(&self, entry_id: Snowflake) -> RepoResult<()>;

    /// Whether any ledger entry still references the item
    async fn item_referenced(&self, item_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Total registered users
    async fn count(&self) -> RepoResult<i64>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

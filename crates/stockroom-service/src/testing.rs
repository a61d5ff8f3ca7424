//! In-memory test doubles for the repository and sink ports
//!
//! Used by the service unit tests so business flows can run without a
//! database. The doubles mirror the semantics of the PostgreSQL
//! implementations, including the version-checked stock write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use stockroom_common::{AlertsConfig, JwtService};
use stockroom_core::entities::{Cart, CartLine, Item, ItemCategory, LedgerEntry, User};
use stockroom_core::error::DomainError;
use stockroom_core::events::{ItemSummary, LowStockAlert};
use stockroom_core::traits::{
    AlertSink, CartRepository, CatalogStats, CategoryRepository, DeliveryError, ItemQuery,
    ItemRepository, LedgerRepository, RepoResult, SearchIndexer, UserRepository,
};
use stockroom_core::value_objects::Snowflake;
use stockroom_core::SnowflakeGenerator;

use crate::services::{LowStockNotifier, ServiceContext, ServiceContextBuilder};

// ============================================================================
// Item repository
// ============================================================================

#[derive(Default)]
pub struct MemoryItemRepository {
    items: Mutex<HashMap<i64, Item>>,
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Item>> {
        Ok(self.items.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Item>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .find(|i| i.sku == sku)
            .cloned())
    }

    async fn sku_exists(&self, sku: &str) -> RepoResult<bool> {
        Ok(self.items.lock().unwrap().values().any(|i| i.sku == sku))
    }

    async fn list(&self, query: ItemQuery) -> RepoResult<Vec<Item>> {
        let items = self.items.lock().unwrap();
        let mut result: Vec<Item> = items
            .values()
            .filter(|i| query.include_retired || i.is_active())
            .filter(|i| query.category_id.is_none_or(|c| i.category_id == c))
            .filter(|i| query.before.is_none_or(|b| i.id < b))
            .filter(|i| query.after.is_none_or(|a| i.id > a))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.id.cmp(&a.id));
        result.truncate(query.limit.max(0) as usize);
        Ok(result)
    }

    async fn create(&self, item: &Item) -> RepoResult<()> {
        let mut items = self.items.lock().unwrap();
        if items.values().any(|i| i.sku == item.sku) {
            return Err(DomainError::SkuAlreadyExists(item.sku.clone()));
        }
        items.insert(item.id.into_inner(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &Item) -> RepoResult<()> {
        let mut items = self.items.lock().unwrap();
        let Some(stored) = items.get_mut(&item.id.into_inner()) else {
            return Err(DomainError::ItemNotFound(item.id));
        };
        // Metadata only; quantity and version belong to update_stock
        let (quantity, version) = (stored.quantity, stored.version);
        *stored = item.clone();
        stored.quantity = quantity;
        stored.version = version;
        Ok(())
    }

    async fn update_stock(
        &self,
        id: Snowflake,
        expected_version: i32,
        new_quantity: i64,
    ) -> RepoResult<()> {
        let mut items = self.items.lock().unwrap();
        let Some(stored) = items.get_mut(&id.into_inner()) else {
            return Err(DomainError::ItemNotFound(id));
        };
        if stored.version != expected_version {
            return Err(DomainError::Conflict(id));
        }
        stored.quantity = new_quantity;
        stored.version += 1;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.items.lock().unwrap().remove(&id.into_inner()).is_none() {
            return Err(DomainError::ItemNotFound(id));
        }
        Ok(())
    }

    async fn stats(&self, default_bar: i64) -> RepoResult<CatalogStats> {
        let items = self.items.lock().unwrap();
        let mut stats = CatalogStats::default();
        for item in items.values().filter(|i| i.is_active()) {
            stats.total_items += 1;
            let bar = item.effective_min_quantity(default_bar);
            if item.quantity <= 0 {
                stats.out_of_stock += 1;
            } else if item.quantity <= bar {
                stats.low_stock += 1;
            }
            if let Some(cost) = item.cost {
                stats.inventory_value += Decimal::from(item.quantity) * cost;
            }
            if item.created_at >= chrono::Utc::now() - chrono::Duration::days(7) {
                stats.new_items_7d += 1;
            }
        }
        Ok(stats)
    }

    async fn recent(&self, limit: i64) -> RepoResult<Vec<Item>> {
        let items = self.items.lock().unwrap();
        let mut result: Vec<Item> = items.values().cloned().collect();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        result.truncate(limit.max(0) as usize);
        Ok(result)
    }
}

// ============================================================================
// Category repository
// ============================================================================

#[derive(Default)]
pub struct MemoryCategoryRepository {
    categories: Mutex<HashMap<i64, ItemCategory>>,
    /// Item counts per category, maintained by tests when needed
    pub referenced: Mutex<Vec<Snowflake>>,
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ItemCategory>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ItemCategory>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn name_exists(&self, name: &str) -> RepoResult<bool> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .values()
            .any(|c| c.name == name))
    }

    async fn list(&self) -> RepoResult<Vec<ItemCategory>> {
        let mut result: Vec<ItemCategory> =
            self.categories.lock().unwrap().values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn create(&self, category: &ItemCategory) -> RepoResult<()> {
        let mut categories = self.categories.lock().unwrap();
        if categories.values().any(|c| c.name == category.name) {
            return Err(DomainError::CategoryAlreadyExists(category.name.clone()));
        }
        categories.insert(category.id.into_inner(), category.clone());
        Ok(())
    }

    async fn rename(&self, id: Snowflake, name: &str) -> RepoResult<()> {
        let mut categories = self.categories.lock().unwrap();
        let Some(category) = categories.get_mut(&id.into_inner()) else {
            return Err(DomainError::CategoryNotFound(id));
        };
        category.name = name.to_string();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.referenced.lock().unwrap().contains(&id) {
            return Err(DomainError::CategoryInUse(id));
        }
        if self
            .categories
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .is_none()
        {
            return Err(DomainError::CategoryNotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.categories.lock().unwrap().len() as i64)
    }
}

// ============================================================================
// Cart repository
// ============================================================================

#[derive(Default)]
pub struct MemoryCartRepository {
    carts: Mutex<HashMap<i64, Cart>>,
    lines: Mutex<HashMap<i64, CartLine>>,
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Cart>> {
        Ok(self
            .carts
            .lock()
            .unwrap()
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn create(&self, cart: &Cart) -> RepoResult<()> {
        let mut carts = self.carts.lock().unwrap();
        if carts.values().any(|c| c.user_id == cart.user_id) {
            return Ok(());
        }
        carts.insert(cart.id.into_inner(), cart.clone());
        Ok(())
    }

    async fn lines(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>> {
        let mut result: Vec<CartLine> = self
            .lines
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.cart_id == cart_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        Ok(result)
    }

    async fn find_line(
        &self,
        cart_id: Snowflake,
        item_id: Snowflake,
    ) -> RepoResult<Option<CartLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .values()
            .find(|l| l.cart_id == cart_id && l.item_id == item_id)
            .cloned())
    }

    async fn create_line(&self, line: &CartLine) -> RepoResult<()> {
        let mut lines = self.lines.lock().unwrap();
        if let Some(existing) = lines
            .values_mut()
            .find(|l| l.cart_id == line.cart_id && l.item_id == line.item_id)
        {
            existing.quantity += line.quantity;
            return Ok(());
        }
        lines.insert(line.id.into_inner(), line.clone());
        Ok(())
    }

    async fn set_line_quantity(&self, line_id: Snowflake, quantity: i64) -> RepoResult<()> {
        let mut lines = self.lines.lock().unwrap();
        let Some(line) = lines.get_mut(&line_id.into_inner()) else {
            return Err(DomainError::CartLineNotFound(line_id));
        };
        line.quantity = quantity;
        Ok(())
    }

    async fn delete_line(&self, cart_id: Snowflake, item_id: Snowflake) -> RepoResult<bool> {
        let mut lines = self.lines.lock().unwrap();
        let key = lines
            .values()
            .find(|l| l.cart_id == cart_id && l.item_id == item_id)
            .map(|l| l.id.into_inner());
        match key {
            Some(k) => {
                lines.remove(&k);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear(&self, cart_id: Snowflake) -> RepoResult<()> {
        self.lines
            .lock()
            .unwrap()
            .retain(|_, l| l.cart_id != cart_id);
        Ok(())
    }
}

// ============================================================================
// Ledger repository
// ============================================================================

#[derive(Default)]
pub struct MemoryLedgerRepository {
    entries: Mutex<HashMap<i64, LedgerEntry>>,
}

#[async_trait]
impl LedgerRepository for MemoryLedgerRepository {
    async fn find(
        &self,
        borrower_id: Snowflake,
        item_id: Snowflake,
    ) -> RepoResult<Option<LedgerEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .values()
            .find(|e| e.borrower_id == borrower_id && e.item_id == item_id)
            .cloned())
    }

    async fn find_by_borrower(&self, borrower_id: Snowflake) -> RepoResult<Vec<LedgerEntry>> {
        let mut result: Vec<LedgerEntry> = self
            .entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.borrower_id == borrower_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn create(&self, entry: &LedgerEntry) -> RepoResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(existing) = entries
            .values_mut()
            .find(|e| e.borrower_id == entry.borrower_id && e.item_id == entry.item_id)
        {
            existing.quantity += entry.quantity;
            return Ok(());
        }
        entries.insert(entry.id.into_inner(), entry.clone());
        Ok(())
    }

    async fn set_quantity(&self, entry_id: Snowflake, quantity: i64) -> RepoResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.get_mut(&entry_id.into_inner()) else {
            return Err(DomainError::LedgerEntryNotFound(entry_id));
        };
        entry.quantity = quantity;
        Ok(())
    }

    async fn delete(&self, entry_id: Snowflake) -> RepoResult<()> {
        if self
            .entries
            .lock()
            .unwrap()
            .remove(&entry_id.into_inner())
            .is_none()
        {
            return Err(DomainError::LedgerEntryNotFound(entry_id));
        }
        Ok(())
    }

    async fn item_referenced(&self, item_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .values()
            .any(|e| e.item_id == item_id))
    }
}

// ============================================================================
// User repository
// ============================================================================

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<i64, (User, String)>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|(u, _)| u.email == email))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.insert(
            user.id.into_inner(),
            (user.clone(), password_hash.to_string()),
        );
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .map(|(_, h)| h.clone()))
    }
}

// ============================================================================
// Sinks and indexer
// ============================================================================

/// Alert sink that records everything delivered to it
#[derive(Default)]
pub struct RecordingSink {
    fail: bool,
    delivered: Mutex<Vec<LowStockAlert>>,
}

impl RecordingSink {
    /// A sink whose every delivery fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Alerts delivered so far
    pub fn delivered(&self) -> Vec<LowStockAlert> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, alert: &LowStockAlert) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::new("recording", "configured to fail"));
        }
        self.delivered.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

/// Indexer that drops everything
#[derive(Debug, Default)]
pub struct NullIndexer;

#[async_trait]
impl SearchIndexer for NullIndexer {
    async fn ensure_index(&self) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn upsert(&self, _item: &ItemSummary) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn remove(&self, _item_id: Snowflake) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn reindex(&self, items: &[ItemSummary]) -> Result<usize, DeliveryError> {
        Ok(items.len())
    }
}

// ============================================================================
// Context helpers
// ============================================================================

/// Build a ServiceContext over fresh in-memory repositories
pub fn test_context() -> ServiceContext {
    test_context_with_notifier(LowStockNotifier::new(&AlertsConfig::default()))
}

/// Build a ServiceContext with a custom notifier (e.g., recording sinks)
pub fn test_context_with_notifier(notifier: LowStockNotifier) -> ServiceContext {
    ServiceContextBuilder::new()
        .item_repo(Arc::new(MemoryItemRepository::default()))
        .category_repo(Arc::new(MemoryCategoryRepository::default()))
        .cart_repo(Arc::new(MemoryCartRepository::default()))
        .ledger_repo(Arc::new(MemoryLedgerRepository::default()))
        .user_repo(Arc::new(MemoryUserRepository::default()))
        .notifier(Arc::new(notifier))
        .indexer(Arc::new(NullIndexer))
        .jwt_service(Arc::new(JwtService::new(
            "test-secret-key-that-is-long-enough",
            900,
            604800,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .expect("test context should build")
}

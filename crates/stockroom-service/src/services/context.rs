//! Service context - dependency container for services
//!
//! Holds the repositories, the low-stock notifier, the search-index
//! collaborator, and the other dependencies services need. Everything is
//! handed in explicitly; services never reach for global state.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use stockroom_common::auth::{JwtService, PasswordService};
use stockroom_core::events::ItemSummary;
use stockroom_core::traits::{
    CartRepository, CategoryRepository, ItemRepository, LedgerRepository, SearchIndexer,
    UserRepository,
};
use stockroom_core::value_objects::Snowflake;
use stockroom_core::SnowflakeGenerator;

use super::notifier::LowStockNotifier;

/// Upper bound for one fire-and-forget index write
const INDEX_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The low-stock notifier and its sinks
/// - The search-index collaborator
/// - JWT and password services for authentication
/// - The snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    item_repo: Arc<dyn ItemRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    cart_repo: Arc<dyn CartRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Side-effect collaborators
    notifier: Arc<LowStockNotifier>,
    indexer: Arc<dyn SearchIndexer>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        item_repo: Arc<dyn ItemRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        cart_repo: Arc<dyn CartRepository>,
        ledger_repo: Arc<dyn LedgerRepository>,
        user_repo: Arc<dyn UserRepository>,
        notifier: Arc<LowStockNotifier>,
        indexer: Arc<dyn SearchIndexer>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            item_repo,
            category_repo,
            cart_repo,
            ledger_repo,
            user_repo,
            notifier,
            indexer,
            jwt_service,
            password_service: PasswordService::new(),
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the item repository
    pub fn item_repo(&self) -> &dyn ItemRepository {
        self.item_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    /// Get the cart repository
    pub fn cart_repo(&self) -> &dyn CartRepository {
        self.cart_repo.as_ref()
    }

    /// Get the ledger repository
    pub fn ledger_repo(&self) -> &dyn LedgerRepository {
        self.ledger_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Side-effect collaborators ===

    /// Get the low-stock notifier
    pub fn notifier(&self) -> &LowStockNotifier {
        self.notifier.as_ref()
    }

    /// Get the search-index collaborator
    pub fn indexer(&self) -> &Arc<dyn SearchIndexer> {
        &self.indexer
    }

    /// Push an item document to the search index on a detached task
    pub fn spawn_index_upsert(&self, item: ItemSummary) {
        let indexer = Arc::clone(&self.indexer);
        tokio::spawn(async move {
            match tokio::time::timeout(INDEX_TIMEOUT, indexer.upsert(&item)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(item_id = %item.id, error = %e, "Search index upsert failed"),
                Err(_) => warn!(item_id = %item.id, "Search index upsert timed out"),
            }
        });
    }

    /// Remove an item document from the search index on a detached task
    pub fn spawn_index_remove(&self, item_id: Snowflake) {
        let indexer = Arc::clone(&self.indexer);
        tokio::spawn(async move {
            match tokio::time::timeout(INDEX_TIMEOUT, indexer.remove(item_id)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(%item_id, error = %e, "Search index remove failed"),
                Err(_) => warn!(%item_id, "Search index remove timed out"),
            }
        });
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &"LowStockNotifier")
            .field("indexer", &"SearchIndexer")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    item_repo: Option<Arc<dyn ItemRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    cart_repo: Option<Arc<dyn CartRepository>>,
    ledger_repo: Option<Arc<dyn LedgerRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    notifier: Option<Arc<LowStockNotifier>>,
    indexer: Option<Arc<dyn SearchIndexer>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_repo(mut self, repo: Arc<dyn ItemRepository>) -> Self {
        self.item_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn cart_repo(mut self, repo: Arc<dyn CartRepository>) -> Self {
        self.cart_repo = Some(repo);
        self
    }

    pub fn ledger_repo(mut self, repo: Arc<dyn LedgerRepository>) -> Self {
        self.ledger_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<LowStockNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn indexer(mut self, indexer: Arc<dyn SearchIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.item_repo
                .ok_or_else(|| ServiceError::validation("item_repo is required"))?,
            self.category_repo
                .ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            self.cart_repo
                .ok_or_else(|| ServiceError::validation("cart_repo is required"))?,
            self.ledger_repo
                .ok_or_else(|| ServiceError::validation("ledger_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
            self.indexer
                .ok_or_else(|| ServiceError::validation("indexer is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}

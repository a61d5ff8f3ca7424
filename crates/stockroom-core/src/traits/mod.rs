//! Ports - interfaces the domain expects infrastructure to implement

mod repositories;
mod sinks;

pub use repositories::{
    CartRepository, CatalogStats, CategoryRepository, ItemQuery, ItemRepository, LedgerRepository,
    RepoResult, UserRepository,
};
pub use sinks::{AlertSink, DeliveryError, SearchIndexer};

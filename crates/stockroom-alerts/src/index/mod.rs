//! Search-index collaborator

mod opensearch;

pub use opensearch::{NoopIndexer, OpenSearchIndexer};

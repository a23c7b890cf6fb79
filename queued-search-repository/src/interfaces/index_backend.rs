//! Index backend trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;
use queued_search_shared::EntityInstance;

use crate::errors::BackendError;

/// Abstracts the search index holding the documents of one entity type.
///
/// Documents are keyed by the entity's composite identifier, so applying the
/// same update twice is harmless. The processor relies on that: after a failed
/// run, some identifiers may be applied again.
#[async_trait]
pub trait IndexBackend: Send + Sync {
    /// Ensure the index (and any alias) exists, creating it if necessary.
    ///
    /// Called once at startup for every registered entity type.
    async fn ensure_index_exists(&self) -> Result<(), BackendError>;

    /// Index a batch of entity instances in a single call.
    ///
    /// # Arguments
    ///
    /// * `instances` - The instances to (re)index, in order
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every instance of the batch was indexed
    /// * `Err(BackendError)` - If the batch, or any part of it, failed
    async fn bulk_update(&self, instances: &[EntityInstance]) -> Result<(), BackendError>;

    /// Remove the document of an entity by its composite identifier.
    ///
    /// Removing a document that does not exist is considered successful.
    async fn remove_by_identifier(&self, identifier: &str) -> Result<(), BackendError>;
}

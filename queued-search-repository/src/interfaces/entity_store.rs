//! Entity store trait definition.

use async_trait::async_trait;
use queued_search_shared::EntityInstance;

use crate::errors::LookupError;

/// Backing store of one entity type.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetch the live instance for a primary key.
    ///
    /// # Returns
    ///
    /// * `Ok(EntityInstance)` - The instance, ready to be indexed
    /// * `Err(LookupError::NotFound)` - If no entity has this key
    /// * `Err(LookupError::Ambiguous)` - If several entities match the key
    /// * `Err(LookupError::StoreError)` - If the store could not be queried
    async fn get(&self, primary_key: &str) -> Result<EntityInstance, LookupError>;
}

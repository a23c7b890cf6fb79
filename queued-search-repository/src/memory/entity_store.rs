//! In-memory entity store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use queued_search_shared::{EntityIdentifier, EntityInstance};
use serde_json::Value;

use crate::errors::LookupError;
use crate::interfaces::EntityStore;

/// Entity store backed by a map of primary key to documents.
///
/// A key mapped to more than one document answers `Ambiguous`, which mirrors a
/// relational lookup on a non-unique column.
pub struct InMemoryEntityStore {
    entity_type: String,
    rows: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryEntityStore {
    /// Create an empty store for an entity type.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// The entity type this store serves.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Add a document under a primary key.
    pub fn insert(&self, primary_key: impl Into<String>, document: Value) {
        if let Ok(mut rows) = self.rows.write() {
            rows.entry(primary_key.into()).or_default().push(document);
        }
    }

    /// Builder-style variant of [`InMemoryEntityStore::insert`].
    pub fn with_entity(self, primary_key: impl Into<String>, document: Value) -> Self {
        self.insert(primary_key, document);
        self
    }

    /// Remove every document of a primary key.
    pub fn remove(&self, primary_key: &str) {
        if let Ok(mut rows) = self.rows.write() {
            rows.remove(primary_key);
        }
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn get(&self, primary_key: &str) -> Result<EntityInstance, LookupError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| LookupError::store(format!("Store lock poisoned: {}", e)))?;

        match rows.get(primary_key).map(Vec::as_slice) {
            None | Some([]) => Err(LookupError::not_found(&self.entity_type, primary_key)),
            Some([document]) => {
                let identifier = EntityIdentifier::new(&self.entity_type, primary_key);
                Ok(EntityInstance::new(
                    identifier.to_string(),
                    primary_key,
                    document.clone(),
                ))
            }
            Some(_) => Err(LookupError::ambiguous(&self.entity_type, primary_key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_existing_entity() {
        let store = InMemoryEntityStore::new("notes.note").with_entity("1", json!({"title": "A"}));

        let instance = store.get("1").await.unwrap();
        assert_eq!(instance.identifier, "notes.note.1");
        assert_eq!(instance.primary_key, "1");
        assert_eq!(instance.document["title"], "A");
    }

    #[tokio::test]
    async fn test_get_missing_entity() {
        let store = InMemoryEntityStore::new("notes.note");
        assert_eq!(
            store.get("abc").await,
            Err(LookupError::not_found("notes.note", "abc"))
        );
    }

    #[tokio::test]
    async fn test_get_ambiguous_entity() {
        let store = InMemoryEntityStore::new("notes.note")
            .with_entity("1", json!({"title": "A"}))
            .with_entity("1", json!({"title": "B"}));

        assert!(matches!(
            store.get("1").await,
            Err(LookupError::Ambiguous { .. })
        ));
    }

    #[tokio::test]
    async fn test_removed_entity_is_not_found() {
        let store = InMemoryEntityStore::new("notes.note").with_entity("1", json!({}));
        store.remove("1");
        assert!(matches!(
            store.get("1").await,
            Err(LookupError::NotFound { .. })
        ));
    }
}

//! Registry of index handlers keyed by entity type.
//!
//! The registry is populated once at startup. The processor resolves the
//! backend and the store of an entity type through it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::interfaces::{EntityStore, IndexBackend};

/// Backend and store serving one entity type.
#[derive(Clone)]
pub struct IndexHandler {
    /// Index receiving the documents of this entity type.
    pub backend: Arc<dyn IndexBackend>,
    /// Store the live instances are fetched from.
    pub store: Arc<dyn EntityStore>,
}

impl IndexHandler {
    /// Create a new handler.
    pub fn new(backend: Arc<dyn IndexBackend>, store: Arc<dyn EntityStore>) -> Self {
        Self { backend, store }
    }
}

/// Explicit mapping from entity type (e.g. `blog.post`) to its handler.
#[derive(Clone, Default)]
pub struct IndexRegistry {
    handlers: HashMap<String, IndexHandler>,
}

impl IndexRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler of an entity type, replacing any previous one.
    pub fn register(
        &mut self,
        entity_type: impl Into<String>,
        backend: Arc<dyn IndexBackend>,
        store: Arc<dyn EntityStore>,
    ) -> &mut Self {
        self.handlers
            .insert(entity_type.into(), IndexHandler::new(backend, store));
        self
    }

    /// Builder-style variant of [`IndexRegistry::register`].
    pub fn with_handler(
        mut self,
        entity_type: impl Into<String>,
        backend: Arc<dyn IndexBackend>,
        store: Arc<dyn EntityStore>,
    ) -> Self {
        self.register(entity_type, backend, store);
        self
    }

    /// Resolve the handler of an entity type.
    pub fn get(&self, entity_type: &str) -> Option<&IndexHandler> {
        self.handlers.get(entity_type)
    }

    /// Iterate over every registered entity type and its handler.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexHandler)> {
        self.handlers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered entity types.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no entity type is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryEntityStore, InMemoryIndex};

    #[test]
    fn test_register_and_resolve() {
        let index = Arc::new(InMemoryIndex::new());
        let store = Arc::new(InMemoryEntityStore::new("blog.post"));

        let registry = IndexRegistry::new().with_handler("blog.post", index, store);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("blog.post").is_some());
        assert!(registry.get("blog.comment").is_none());
    }

    #[test]
    fn test_register_replaces_handler() {
        let mut registry = IndexRegistry::new();
        let first = Arc::new(InMemoryIndex::new());
        let second = Arc::new(InMemoryIndex::new());

        registry.register(
            "notes.note",
            first,
            Arc::new(InMemoryEntityStore::new("notes.note")),
        );
        registry.register(
            "notes.note",
            second,
            Arc::new(InMemoryEntityStore::new("notes.note")),
        );

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = IndexRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}

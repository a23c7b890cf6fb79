//! Entity instances as handed from an entity store to an index backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A live entity fetched from its backing store.
///
/// The processor never looks inside `document`; it is the indexable body the
/// store produced and the backend consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityInstance {
    /// Composite identifier, e.g. `blog.post.42`. Index backends key documents on it.
    pub identifier: String,
    /// Primary key within the entity type.
    pub primary_key: String,
    /// Document body to index.
    pub document: Value,
}

impl EntityInstance {
    /// Create a new entity instance.
    pub fn new(identifier: impl Into<String>, primary_key: impl Into<String>, document: Value) -> Self {
        Self {
            identifier: identifier.into(),
            primary_key: primary_key.into(),
            document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_instance_serialization() {
        let instance = EntityInstance::new("blog.post.42", "42", json!({"title": "Hello"}));

        let serialized = serde_json::to_value(&instance).unwrap();
        assert_eq!(serialized["identifier"], "blog.post.42");
        assert_eq!(serialized["primary_key"], "42");
        assert_eq!(serialized["document"]["title"], "Hello");

        let back: EntityInstance = serde_json::from_value(serialized).unwrap();
        assert_eq!(back, instance);
    }
}

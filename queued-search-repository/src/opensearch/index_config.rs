//! OpenSearch index configuration.

use serde_json::{json, Value};

/// Configuration for the index of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The alias name for the index (used for all operations).
    pub alias: String,
    /// The version number for the index (e.g., 0 for "blog_post_v0").
    pub version: u32,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `alias` - The index alias name
    /// * `version` - The version number
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
        }
    }

    /// Derive the configuration of an entity type's index.
    ///
    /// Dots become underscores and the result is lowercased, since OpenSearch
    /// index names must be lowercase: `blog.Post` with prefix `site_` gives
    /// the alias `site_blog_post`.
    pub fn for_entity_type(prefix: &str, entity_type: &str, version: u32) -> Self {
        let alias = format!("{}{}", prefix, entity_type.replace('.', "_")).to_lowercase();
        Self::new(alias, version)
    }

    /// The versioned index name (e.g., "blog_post_v0").
    pub fn versioned_index_name(&self) -> String {
        format!("{}_v{}", self.alias, self.version)
    }
}

/// Get the settings used when creating an index.
///
/// No mappings are declared: the documents come whole from the entity stores
/// and their fields are mapped dynamically.
pub fn get_index_settings(alias: &str) -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "aliases": {
            alias: {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_entity_type() {
        let config = IndexConfig::for_entity_type("", "blog.post", 0);
        assert_eq!(config.alias, "blog_post");

        let config = IndexConfig::for_entity_type("site_", "myproject.Notes.note", 2);
        assert_eq!(config.alias, "site_myproject_notes_note");
        assert_eq!(config.version, 2);
    }

    #[test]
    fn test_versioned_index_name() {
        assert_eq!(IndexConfig::new("notes_note", 0).versioned_index_name(), "notes_note_v0");
        assert_eq!(IndexConfig::new("notes_note", 42).versioned_index_name(), "notes_note_v42");
    }

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings("blog_post");

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());
        assert!(settings["aliases"]["blog_post"].is_object());
    }
}

//! Parsing of the entity type list.
//!
//! `SEARCH_QUEUE_ENTITY_TYPES` lists the indexed entity types and the tables
//! they live in: `blog.post=posts,notes.note=notes:note_id`. The primary key
//! column defaults to `id`.

use queued_search_repository::{quote_sql_identifier, TableConfig};

use crate::QueuedSearchError;

/// An indexed entity type and its backing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntityType {
    /// Entity type, e.g. `blog.post`.
    pub entity_type: String,
    /// Table holding its rows.
    pub table: TableConfig,
}

impl IndexedEntityType {
    /// Parse one `type=table[:pk_column]` entry.
    pub fn parse(entry: &str) -> Result<Self, QueuedSearchError> {
        let (entity_type, location) = entry.trim().split_once('=').ok_or_else(|| {
            QueuedSearchError::config(format!(
                "Entity type entry '{}' must look like type=table[:pk_column]",
                entry
            ))
        })?;

        let entity_type = entity_type.trim();
        if entity_type.is_empty() {
            return Err(QueuedSearchError::config(format!(
                "Entity type entry '{}' has no entity type",
                entry
            )));
        }

        let table = match location.trim().split_once(':') {
            Some((table, column)) => {
                TableConfig::new(table.trim()).with_primary_key_column(column.trim())
            }
            None => TableConfig::new(location.trim()),
        };

        for name in [&table.table, &table.primary_key_column] {
            quote_sql_identifier(name).map_err(|e| {
                QueuedSearchError::config(format!("Entity type '{}': {}", entity_type, e))
            })?;
        }

        Ok(Self {
            entity_type: entity_type.to_string(),
            table,
        })
    }

    /// Parse a comma-separated list of entries. Empty entries are ignored.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, QueuedSearchError> {
        list.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_primary_key() {
        let indexed = IndexedEntityType::parse("blog.post=posts").unwrap();
        assert_eq!(indexed.entity_type, "blog.post");
        assert_eq!(indexed.table, TableConfig::new("posts"));
        assert_eq!(indexed.table.primary_key_column, "id");
    }

    #[test]
    fn test_parse_custom_primary_key() {
        let indexed = IndexedEntityType::parse(" notes.note = public.notes:note_id ").unwrap();
        assert_eq!(indexed.entity_type, "notes.note");
        assert_eq!(indexed.table.table, "public.notes");
        assert_eq!(indexed.table.primary_key_column, "note_id");
    }

    #[test]
    fn test_parse_list() {
        let types = IndexedEntityType::parse_list("blog.post=posts,,notes.note=notes:note_id,").unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[1].entity_type, "notes.note");
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        assert!(IndexedEntityType::parse("blog.post").is_err());
        assert!(IndexedEntityType::parse("=posts").is_err());
        assert!(IndexedEntityType::parse("blog.post=posts;drop").is_err());
        assert!(IndexedEntityType::parse("blog.post=posts:").is_err());
        assert!(IndexedEntityType::parse_list("blog.post=posts,broken").is_err());
    }
}

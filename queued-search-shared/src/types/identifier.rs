//! Composite entity identifiers.
//!
//! An identifier such as `myproject.blog.post.42` names the entity type
//! (`myproject.blog.post`) and the primary key (`42`). The type may itself be
//! namespaced, so the split always happens on the last delimiter.

use std::fmt;

use crate::errors::IdentifierError;

/// Delimiter between identifier segments.
pub const DELIMITER: char = '.';

/// An identifier split into entity type and primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityIdentifier {
    /// Entity type path, e.g. `blog.post`.
    pub entity_type: String,
    /// Primary key within the entity type, e.g. `42`.
    pub primary_key: String,
}

impl EntityIdentifier {
    /// Build an identifier from its parts.
    pub fn new(entity_type: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            primary_key: primary_key.into(),
        }
    }

    /// Split a composite identifier on its last delimiter.
    ///
    /// # Example
    ///
    /// ```
    /// use queued_search_shared::EntityIdentifier;
    ///
    /// let id = EntityIdentifier::parse("myproject.tests.note.73").unwrap();
    /// assert_eq!(id.entity_type, "myproject.tests.note");
    /// assert_eq!(id.primary_key, "73");
    /// ```
    pub fn parse(identifier: &str) -> Result<Self, IdentifierError> {
        let (entity_type, primary_key) = identifier
            .rsplit_once(DELIMITER)
            .ok_or_else(|| IdentifierError::too_few_segments(identifier))?;

        if entity_type.is_empty() || primary_key.is_empty() {
            return Err(IdentifierError::empty_segment(identifier));
        }

        Ok(Self::new(entity_type, primary_key))
    }
}

impl fmt::Display for EntityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.entity_type, DELIMITER, self.primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_identifier() {
        let id = EntityIdentifier::parse("tests.note.1").unwrap();
        assert_eq!(id, EntityIdentifier::new("tests.note", "1"));
    }

    #[test]
    fn test_parse_namespaced_type() {
        let id = EntityIdentifier::parse("myproject.tests.note.73").unwrap();
        assert_eq!(id.entity_type, "myproject.tests.note");
        assert_eq!(id.primary_key, "73");
    }

    #[test]
    fn test_parse_two_segments() {
        let id = EntityIdentifier::parse("wtfmate.1").unwrap();
        assert_eq!(id, EntityIdentifier::new("wtfmate", "1"));
    }

    #[test]
    fn test_parse_non_numeric_key() {
        let id = EntityIdentifier::parse("tests.note.abc").unwrap();
        assert_eq!(id.primary_key, "abc");
    }

    #[test]
    fn test_parse_single_segment() {
        let result = EntityIdentifier::parse("wtfmate");
        assert_eq!(
            result,
            Err(IdentifierError::TooFewSegments("wtfmate".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_segments() {
        assert!(matches!(
            EntityIdentifier::parse("note."),
            Err(IdentifierError::EmptySegment(_))
        ));
        assert!(matches!(
            EntityIdentifier::parse(".1"),
            Err(IdentifierError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_display_rebuilds_identifier() {
        let id = EntityIdentifier::parse("blog.post.42").unwrap();
        assert_eq!(id.to_string(), "blog.post.42");
    }
}

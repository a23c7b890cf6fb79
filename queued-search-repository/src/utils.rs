//! Utility functions for the queued search repository.

use crate::errors::LookupError;

/// Validate and quote a SQL identifier (table or column name).
///
/// Names must be non-empty and contain only alphanumeric characters and
/// underscores, optionally schema-qualified with a single `.`. Each part is
/// double-quoted in the result.
///
/// # Example
///
/// ```
/// use queued_search_repository::quote_sql_identifier;
///
/// assert_eq!(quote_sql_identifier("public.posts").unwrap(), "\"public\".\"posts\"");
/// assert!(quote_sql_identifier("posts; DROP TABLE posts").is_err());
/// ```
pub fn quote_sql_identifier(name: &str) -> Result<String, LookupError> {
    let parts: Vec<&str> = name.split('.').collect();

    if parts.len() > 2 {
        return Err(LookupError::store(format!(
            "SQL identifier '{}' has too many parts",
            name
        )));
    }

    for part in &parts {
        if part.is_empty() {
            return Err(LookupError::store(format!(
                "SQL identifier '{}' has an empty part",
                name
            )));
        }

        if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(LookupError::store(format!(
                "SQL identifier '{}' contains invalid characters. Only alphanumeric characters and underscores are allowed",
                name
            )));
        }
    }

    Ok(parts
        .iter()
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_identifier() {
        assert_eq!(quote_sql_identifier("notes").unwrap(), "\"notes\"");
        assert_eq!(quote_sql_identifier("note_id").unwrap(), "\"note_id\"");
    }

    #[test]
    fn test_quote_schema_qualified_identifier() {
        assert_eq!(
            quote_sql_identifier("blog.posts").unwrap(),
            "\"blog\".\"posts\""
        );
    }

    #[test]
    fn test_reject_invalid_identifiers() {
        let test_cases = vec![
            ("", "empty"),
            ("a.b.c", "three parts"),
            (".posts", "empty schema"),
            ("posts.", "empty table"),
            ("posts-archive", "contains dash"),
            ("posts archive", "contains space"),
            ("posts\"", "contains quote"),
            ("posts;drop", "contains semicolon"),
        ];

        for (name, description) in test_cases {
            assert!(
                quote_sql_identifier(name).is_err(),
                "Expected error for '{}' ({})",
                name,
                description
            );
        }
    }
}

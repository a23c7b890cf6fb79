//! Grouping of identifiers by entity type.

use std::collections::HashMap;

use queued_search_shared::EntityIdentifier;
use tracing::error;

/// Primary keys of one entity type awaiting application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchGroup {
    /// Entity type shared by every key of the group.
    pub entity_type: String,
    /// Primary keys, in the order they were grouped.
    pub primary_keys: Vec<String>,
}

impl BatchGroup {
    /// Composite identifiers of the group's keys.
    pub fn identifiers(&self) -> impl Iterator<Item = String> + '_ {
        self.primary_keys
            .iter()
            .map(|pk| EntityIdentifier::new(&self.entity_type, pk).to_string())
    }
}

/// Groups identifiers by entity type, keeping first-seen order.
///
/// Returns the groups and the number of identifiers that could not be split.
/// Those are logged and left out.
pub fn group_by_entity_type<'a, I>(identifiers: I) -> (Vec<BatchGroup>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: Vec<BatchGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut invalid = 0;

    for identifier in identifiers {
        let parsed = match EntityIdentifier::parse(identifier) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(identifier = %identifier, error = %e, "Unable to parse object identifier, skipping");
                invalid += 1;
                continue;
            }
        };

        let position = *positions
            .entry(parsed.entity_type.clone())
            .or_insert_with(|| {
                groups.push(BatchGroup {
                    entity_type: parsed.entity_type.clone(),
                    primary_keys: Vec::new(),
                });
                groups.len() - 1
            });

        groups[position].primary_keys.push(parsed.primary_key);
    }

    (groups, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let (groups, invalid) = group_by_entity_type([
            "blog.post.1",
            "notes.note.7",
            "blog.post.2",
            "myproject.notes.note.3",
        ]);

        assert_eq!(invalid, 0);
        assert_eq!(
            groups,
            vec![
                BatchGroup {
                    entity_type: "blog.post".to_string(),
                    primary_keys: vec!["1".to_string(), "2".to_string()],
                },
                BatchGroup {
                    entity_type: "notes.note".to_string(),
                    primary_keys: vec!["7".to_string()],
                },
                BatchGroup {
                    entity_type: "myproject.notes.note".to_string(),
                    primary_keys: vec!["3".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_invalid_identifiers_are_counted() {
        let (groups, invalid) = group_by_entity_type(["wtfmate", "t.1", "note."]);

        assert_eq!(invalid, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].primary_keys, vec!["1".to_string()]);
    }

    #[test]
    fn test_identifiers_round_trip() {
        let (groups, _) = group_by_entity_type(["blog.post.1", "blog.post.abc"]);
        let identifiers: Vec<String> = groups[0].identifiers().collect();
        assert_eq!(identifiers, vec!["blog.post.1", "blog.post.abc"]);
    }
}

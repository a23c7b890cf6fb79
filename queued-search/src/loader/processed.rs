//! Identifiers confirmed applied during a run.

use std::collections::HashSet;

/// Identifiers whose update batch was written or whose delete was executed.
///
/// Only used to decide what to re-queue after a failure.
#[derive(Debug, Clone, Default)]
pub struct ProcessedSet {
    identifiers: HashSet<String>,
}

impl ProcessedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identifier as applied.
    pub fn insert(&mut self, identifier: impl Into<String>) {
        self.identifiers.insert(identifier.into());
    }

    /// Whether an identifier was applied.
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Number of applied identifiers.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Whether nothing was applied.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

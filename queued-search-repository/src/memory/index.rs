//! In-memory index backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use queued_search_shared::EntityInstance;
use serde_json::Value;

use crate::errors::BackendError;
use crate::interfaces::IndexBackend;

#[derive(Default)]
struct IndexState {
    documents: HashMap<String, Value>,
    bulk_calls: Vec<Vec<String>>,
    removed: Vec<String>,
    fail_bulk_after: Option<usize>,
    fail_remove_of: Option<String>,
}

/// An index holding documents in a map keyed by identifier.
///
/// Every bulk call and removal is recorded, and failures can be injected to
/// exercise recovery paths.
#[derive(Default)]
pub struct InMemoryIndex {
    state: Mutex<IndexState>,
}

impl InMemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every bulk update after the first `successful_calls` fail.
    pub fn fail_bulk_update_after(self, successful_calls: usize) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.fail_bulk_after = Some(successful_calls);
        }
        self
    }

    /// Make removal of one identifier fail.
    pub fn fail_remove_of(self, identifier: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.fail_remove_of = Some(identifier.into());
        }
        self
    }

    /// Indexed document of an identifier.
    pub fn document(&self, identifier: &str) -> Option<Value> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.documents.get(identifier).cloned())
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.state.lock().map(|s| s.documents.len()).unwrap_or(0)
    }

    /// Identifiers of every successful bulk call, one entry per call.
    pub fn bulk_calls(&self) -> Vec<Vec<String>> {
        self.state
            .lock()
            .map(|s| s.bulk_calls.clone())
            .unwrap_or_default()
    }

    /// Identifiers removed so far, in call order.
    pub fn removed(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.removed.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndexState>, BackendError> {
        self.state
            .lock()
            .map_err(|e| BackendError::unknown(format!("Index lock poisoned: {}", e)))
    }
}

#[async_trait]
impl IndexBackend for InMemoryIndex {
    async fn ensure_index_exists(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn bulk_update(&self, instances: &[EntityInstance]) -> Result<(), BackendError> {
        let mut state = self.lock()?;

        if let Some(limit) = state.fail_bulk_after {
            if state.bulk_calls.len() >= limit {
                return Err(BackendError::bulk(format!(
                    "Injected failure on bulk call #{}",
                    state.bulk_calls.len() + 1
                )));
            }
        }

        for instance in instances {
            state
                .documents
                .insert(instance.identifier.clone(), instance.document.clone());
        }
        let identifiers = instances.iter().map(|i| i.identifier.clone()).collect();
        state.bulk_calls.push(identifiers);

        Ok(())
    }

    async fn remove_by_identifier(&self, identifier: &str) -> Result<(), BackendError> {
        let mut state = self.lock()?;

        if state.fail_remove_of.as_deref() == Some(identifier) {
            return Err(BackendError::remove(format!(
                "Injected failure removing '{}'",
                identifier
            )));
        }

        state.documents.remove(identifier);
        state.removed.push(identifier.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance(identifier: &str) -> EntityInstance {
        let pk = identifier.rsplit('.').next().unwrap_or_default();
        EntityInstance::new(identifier, pk, json!({ "id": identifier }))
    }

    #[tokio::test]
    async fn test_bulk_update_and_remove() {
        let index = InMemoryIndex::new();

        index
            .bulk_update(&[instance("t.1"), instance("t.2")])
            .await
            .unwrap();
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.bulk_calls(), vec![vec!["t.1", "t.2"]]);

        index.remove_by_identifier("t.1").await.unwrap();
        assert!(index.document("t.1").is_none());
        assert_eq!(index.removed(), vec!["t.1"]);
    }

    #[tokio::test]
    async fn test_remove_missing_document_succeeds() {
        let index = InMemoryIndex::new();
        assert!(index.remove_by_identifier("t.404").await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_bulk_failure() {
        let index = InMemoryIndex::new().fail_bulk_update_after(1);

        assert!(index.bulk_update(&[instance("t.1")]).await.is_ok());
        let result = index.bulk_update(&[instance("t.2")]).await;

        assert!(matches!(result, Err(BackendError::BulkError(_))));
        assert!(index.document("t.2").is_none());
        assert_eq!(index.bulk_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_remove_failure() {
        let index = InMemoryIndex::new().fail_remove_of("t.2");

        assert!(index.remove_by_identifier("t.1").await.is_ok());
        assert!(matches!(
            index.remove_by_identifier("t.2").await,
            Err(BackendError::RemoveError(_))
        ));
    }
}

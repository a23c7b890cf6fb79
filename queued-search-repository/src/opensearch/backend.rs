//! OpenSearch backend implementation.
//!
//! This module provides the concrete implementation of `IndexBackend`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, DeleteParts, OpenSearch,
};
use queued_search_shared::EntityInstance;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::BackendError;
use crate::interfaces::IndexBackend;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};

/// OpenSearch backend for the documents of one entity type.
///
/// Documents are indexed with the entity's composite identifier as `_id`.
///
/// # Example
///
/// ```ignore
/// use queued_search_repository::opensearch::{IndexConfig, OpenSearchBackend};
///
/// let config = IndexConfig::for_entity_type("", "blog.post", 0);
/// let backend = OpenSearchBackend::new("http://localhost:9200", config)?;
/// backend.ensure_index_exists().await?;
/// ```
pub struct OpenSearchBackend {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchBackend {
    /// Create a new backend connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing alias and version
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchBackend)` - A new backend instance
    /// * `Err(BackendError)` - If connection setup fails
    pub fn new(url: &str, index_config: IndexConfig) -> Result<Self, BackendError> {
        let client = Self::connect(url)?;

        info!(
            url = %url,
            alias = %index_config.alias,
            version = index_config.version,
            "Created OpenSearch backend"
        );

        Ok(Self::with_client(client, index_config))
    }

    /// Create a backend sharing an existing client.
    pub fn with_client(client: OpenSearch, index_config: IndexConfig) -> Self {
        Self {
            client,
            index_config,
        }
    }

    /// Build a client for a single-node cluster.
    pub fn connect(url: &str) -> Result<OpenSearch, BackendError> {
        let parsed_url = Url::parse(url).map_err(|e| BackendError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| BackendError::connection(e.to_string()))?;

        Ok(OpenSearch::new(transport))
    }

    /// The index configuration of this backend.
    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }

    /// Build the `_bulk` body: one `index` action line followed by the document.
    fn bulk_body(instances: &[EntityInstance]) -> Vec<JsonBody<Value>> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(instances.len() * 2);
        for instance in instances {
            body.push(JsonBody::new(json!({ "index": { "_id": instance.identifier } })));
            body.push(JsonBody::new(instance.document.clone()));
        }
        body
    }

    /// Collect the `_id`s of failed items from a `_bulk` response.
    fn failed_items(response: &Value) -> Vec<String> {
        if !response["errors"].as_bool().unwrap_or(false) {
            return Vec::new();
        }

        response["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("index"))
                    .filter(|op| !op["error"].is_null())
                    .map(|op| op["_id"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl IndexBackend for OpenSearchBackend {
    async fn ensure_index_exists(&self) -> Result<(), BackendError> {
        let alias = self.index_config.alias.as_str();

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[alias]))
            .send()
            .await
            .map_err(|e| BackendError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(alias = %alias, "Index already exists");
            return Ok(());
        }

        let index_name = self.index_config.versioned_index_name();
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&index_name))
            .body(get_index_settings(alias))
            .send()
            .await
            .map_err(|e| BackendError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(BackendError::index_creation(format!(
                "Creating index {} failed with status {}: {}",
                index_name, status, error_body
            )));
        }

        info!(index = %index_name, alias = %alias, "Created index");
        Ok(())
    }

    async fn bulk_update(&self, instances: &[EntityInstance]) -> Result<(), BackendError> {
        if instances.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.alias))
            .body(Self::bulk_body(instances))
            .send()
            .await
            .map_err(|e| BackendError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(BackendError::bulk(format!(
                "Bulk update failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::parse(e.to_string()))?;

        let failed = Self::failed_items(&body);
        if !failed.is_empty() {
            return Err(BackendError::bulk(format!(
                "{} of {} documents were rejected: {}",
                failed.len(),
                instances.len(),
                failed.join(", ")
            )));
        }

        debug!(
            alias = %self.index_config.alias,
            count = instances.len(),
            "Documents indexed"
        );
        Ok(())
    }

    async fn remove_by_identifier(&self, identifier: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_config.alias, identifier))
            .send()
            .await
            .map_err(|e| BackendError::remove(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(BackendError::remove(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(identifier = %identifier, "Document removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_body_pairs_action_and_document() {
        let instances = vec![
            EntityInstance::new("blog.post.1", "1", json!({"title": "One"})),
            EntityInstance::new("blog.post.2", "2", json!({"title": "Two"})),
        ];

        let body = OpenSearchBackend::bulk_body(&instances);
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_failed_items_without_errors() {
        let response = json!({
            "errors": false,
            "items": [{ "index": { "_id": "blog.post.1", "status": 201 } }]
        });
        assert!(OpenSearchBackend::failed_items(&response).is_empty());
    }

    #[test]
    fn test_failed_items_with_errors() {
        let response = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "blog.post.1", "status": 201 } },
                { "index": { "_id": "blog.post.2", "status": 400, "error": { "type": "mapper_parsing_exception" } } }
            ]
        });
        assert_eq!(
            OpenSearchBackend::failed_items(&response),
            vec!["blog.post.2".to_string()]
        );
    }
}

//! Dependency initialization and wiring for the queue processor.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use queued_search_repository::opensearch::IndexConfig;
use queued_search_repository::postgres::run_migrations;
use queued_search_repository::{
    IndexBackend, IndexRegistry, OpenSearchBackend, PostgresEntityStore, PostgresQueue,
};
use sqlx::postgres::PgPoolOptions;
use tokio::time::sleep;
use tracing::{info, warn};

use super::{IndexedEntityType, ProcessorConfig};
use crate::orchestrator::QueueProcessor;
use crate::QueuedSearchError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Default number of pooled database connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if an index cannot be prepared.
    FailFast,
    /// Retry every retry interval until the index is ready.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Anything else falls back to "retry".
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("retry").to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }

    fn from_env() -> Self {
        Self::parse(env::var("OPENSEARCH_CONNECTION_MODE").ok().as_deref())
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured processor ready to run.
    pub processor: QueueProcessor,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `SEARCH_QUEUE_NAME`, `SEARCH_QUEUE_BATCH_SIZE`: see [`ProcessorConfig::from_env`]
    /// - `SEARCH_QUEUE_ENTITY_TYPES`: Indexed entity types, `type=table[:pk_column]` comma-separated (required)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_INDEX_PREFIX`: Prefix for index aliases (default: none)
    /// - `OPENSEARCH_INDEX_VERSION`: Index version number (default: 0)
    /// - `OPENSEARCH_CONNECTION_MODE`: Connection mode - "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(QueuedSearchError)` - If initialization fails
    pub async fn new() -> Result<Self, QueuedSearchError> {
        let config = ProcessorConfig::from_env();
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| QueuedSearchError::config("DATABASE_URL must be set"))?;
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let index_prefix = env::var("OPENSEARCH_INDEX_PREFIX").unwrap_or_default();
        let index_version = env::var("OPENSEARCH_INDEX_VERSION")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("OPENSEARCH_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);
        let entity_types =
            IndexedEntityType::parse_list(&env::var("SEARCH_QUEUE_ENTITY_TYPES").unwrap_or_default())?;

        if entity_types.is_empty() {
            return Err(QueuedSearchError::config(
                "SEARCH_QUEUE_ENTITY_TYPES must list at least one entity type",
            ));
        }

        info!(
            queue_name = %config.queue_name,
            batch_size = config.batch_size,
            opensearch_url = %opensearch_url,
            entity_types = entity_types.len(),
            connection_mode = ?connection_mode,
            retry_interval_secs = retry_interval,
            "Initializing dependencies"
        );

        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect(&database_url)
            .await
            .map_err(|e| QueuedSearchError::config(format!("Failed to connect to database: {}", e)))?;

        run_migrations(&pool)
            .await
            .map_err(|e| QueuedSearchError::config(format!("Failed to run migrations: {}", e)))?;

        info!("Database connection established");

        let queue = Arc::new(PostgresQueue::new(pool.clone(), config.queue_name.clone()));

        let client = OpenSearchBackend::connect(&opensearch_url).map_err(|e| {
            QueuedSearchError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        let mut registry = IndexRegistry::new();
        for indexed in &entity_types {
            let index_config =
                IndexConfig::for_entity_type(&index_prefix, &indexed.entity_type, index_version);
            let backend = OpenSearchBackend::with_client(client.clone(), index_config);

            Self::prepare_index(
                &backend,
                &indexed.entity_type,
                connection_mode,
                Duration::from_secs(retry_interval),
            )
            .await?;

            let store =
                PostgresEntityStore::new(pool.clone(), indexed.entity_type.as_str(), &indexed.table)
                    .map_err(|e| {
                        QueuedSearchError::config(format!(
                            "Invalid table for entity type '{}': {}",
                            indexed.entity_type, e
                        ))
                    })?;

            registry.register(
                indexed.entity_type.as_str(),
                Arc::new(backend),
                Arc::new(store),
            );
        }

        info!(indexes = registry.len(), "OpenSearch indexes ready");

        let processor = QueueProcessor::with_config(queue, registry, &config);

        Ok(Self { processor })
    }

    /// Ensure the index of an entity type exists, retrying based on connection mode.
    async fn prepare_index(
        backend: &OpenSearchBackend,
        entity_type: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<(), QueuedSearchError> {
        loop {
            match backend.ensure_index_exists().await {
                Ok(()) => return Ok(()),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(QueuedSearchError::config(format!(
                            "Failed to ensure index exists for '{}': {}",
                            entity_type, e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            entity_type = %entity_type,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to prepare OpenSearch index, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_mode_parse() {
        assert_eq!(ConnectionMode::parse(None), ConnectionMode::Retry);
        assert_eq!(ConnectionMode::parse(Some("retry")), ConnectionMode::Retry);
        assert_eq!(ConnectionMode::parse(Some("Fail-Fast")), ConnectionMode::FailFast);
        assert_eq!(ConnectionMode::parse(Some("fail_fast")), ConnectionMode::FailFast);
        assert_eq!(ConnectionMode::parse(Some("sometimes")), ConnectionMode::Retry);
    }
}

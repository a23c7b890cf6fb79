//! # Queued Search Repository
//!
//! This crate provides the traits the queue processor talks to (queue
//! transport, entity store, index backend), the registry binding entity
//! types to their store and backend, and concrete implementations:
//! in-memory, PostgreSQL (queue and entity store) and OpenSearch (index).

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod postgres;
pub mod registry;
pub mod utils;

pub use errors::{BackendError, LookupError, QueueError};
pub use interfaces::{EntityStore, IndexBackend, QueueTransport};
pub use memory::{InMemoryEntityStore, InMemoryIndex, InMemoryQueue};
pub use opensearch::OpenSearchBackend;
pub use postgres::{PostgresEntityStore, PostgresQueue, TableConfig};
pub use registry::{IndexHandler, IndexRegistry};
pub use utils::quote_sql_identifier;

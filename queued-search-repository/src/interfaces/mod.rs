//! Interface definitions for the processor's collaborators.
//!
//! These traits allow the queue transport, the entity stores and the index
//! backends to be swapped (PostgreSQL, OpenSearch, in-memory, mocks).

mod entity_store;
mod index_backend;
mod queue_transport;

pub use entity_store::EntityStore;
pub use index_backend::IndexBackend;
pub use queue_transport::QueueTransport;

//! Error types for the queued search repository.
//!
//! One error family per collaborator: the queue transport, the entity stores
//! and the index backends.

mod backend_error;
mod lookup_error;
mod queue_error;

pub use backend_error::BackendError;
pub use lookup_error::LookupError;
pub use queue_error::QueueError;

//! In-memory implementations of the collaborator traits.
//!
//! Useful for embedding the processor in tests or in a single process where
//! durability is not required.

mod entity_store;
mod index;
mod queue;

pub use entity_store::InMemoryEntityStore;
pub use index::InMemoryIndex;
pub use queue::InMemoryQueue;

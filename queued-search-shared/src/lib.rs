//! # Queued Search Shared
//!
//! This crate defines the data structures shared across the queued search
//! ecosystem: the change notification and its wire codec, the composite entity
//! identifier, and the entity instance handed from entity stores to index
//! backends.

pub mod errors;
pub mod types;

pub use errors::{IdentifierError, MessageError};
pub use types::entity::EntityInstance;
pub use types::identifier::EntityIdentifier;
pub use types::notification::{Action, Notification};

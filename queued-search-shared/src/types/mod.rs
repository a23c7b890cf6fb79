//! This module defines the core data structures used across the queued search
//! processor. It re-exports the notification, identifier and entity types.

pub mod entity;
pub mod identifier;
pub mod notification;

pub use entity::EntityInstance;
pub use identifier::EntityIdentifier;
pub use notification::{Action, Notification};

//! Error types for decoding wire messages and splitting identifiers.
//!
//! Both error families are non-fatal for the processor: the offending message
//! or identifier is logged and skipped.

use thiserror::Error;

/// Errors raised while decoding a wire message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The message does not contain the `:` separator.
    #[error("Missing separator in message '{0}'")]
    MissingSeparator(String),

    /// The verb before the separator is neither `update` nor `delete`.
    #[error("Unrecognized action '{0}'")]
    UnknownAction(String),

    /// Nothing follows the separator.
    #[error("Empty identifier in message '{0}'")]
    EmptyIdentifier(String),
}

impl MessageError {
    /// Create a missing separator error.
    pub fn missing_separator(message: impl Into<String>) -> Self {
        Self::MissingSeparator(message.into())
    }

    /// Create an unknown action error.
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction(action.into())
    }

    /// Create an empty identifier error.
    pub fn empty_identifier(message: impl Into<String>) -> Self {
        Self::EmptyIdentifier(message.into())
    }
}

/// Errors raised while splitting a composite entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier has no `.` delimiter.
    #[error("Identifier '{0}' needs at least an entity type and a primary key")]
    TooFewSegments(String),

    /// The entity type or the primary key is empty.
    #[error("Identifier '{0}' has an empty entity type or primary key")]
    EmptySegment(String),
}

impl IdentifierError {
    /// Create a too-few-segments error.
    pub fn too_few_segments(identifier: impl Into<String>) -> Self {
        Self::TooFewSegments(identifier.into())
    }

    /// Create an empty segment error.
    pub fn empty_segment(identifier: impl Into<String>) -> Self {
        Self::EmptySegment(identifier.into())
    }
}

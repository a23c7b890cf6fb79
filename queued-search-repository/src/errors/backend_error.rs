//! Index backend error types.

use thiserror::Error;

/// Errors raised by an index backend.
///
/// Any of these aborts the current processing run: the processor re-queues
/// the unconfirmed work and reports the run as failed.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Failed to establish a connection to the backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A bulk update was rejected, partly or entirely.
    #[error("Bulk update error: {0}")]
    BulkError(String),

    /// Removing a document failed.
    #[error("Remove error: {0}")]
    RemoveError(String),

    /// Failed to create the index or its alias.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a backend response.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl BackendError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a bulk update error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkError(msg.into())
    }

    /// Create a remove error.
    pub fn remove(msg: impl Into<String>) -> Self {
        Self::RemoveError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an unknown error.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}

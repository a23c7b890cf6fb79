//! Queue transport error types.

use thiserror::Error;

/// Errors raised by a queue transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Nothing is left to read. This is how a drain knows it is finished.
    #[error("Queue '{0}' is empty")]
    Empty(String),

    /// Failed to reach the queue storage.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The queue storage rejected an operation.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl QueueError {
    /// Create an empty-queue signal.
    pub fn empty(queue_name: impl Into<String>) -> Self {
        Self::Empty(queue_name.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    /// Whether this is the empty-queue signal rather than a failure.
    pub fn is_empty_signal(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

impl From<sqlx::Error> for QueueError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::ConnectionError(err.to_string())
            }
            other => Self::StorageError(other.to_string()),
        }
    }
}

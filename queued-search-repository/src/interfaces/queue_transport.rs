//! Queue transport trait definition.

use async_trait::async_trait;

use crate::errors::QueueError;

/// A durable FIFO of wire messages.
///
/// Reads are destructive: a message returned by `read` is gone from the queue.
/// Only one processor should drain a given queue at a time.
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// The queue's name.
    fn name(&self) -> &str;

    /// Append a message to the tail of the queue.
    async fn write(&self, message: &str) -> Result<(), QueueError>;

    /// Remove and return the message at the head of the queue.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The oldest message
    /// * `Err(QueueError::Empty)` - If nothing remains
    /// * `Err(QueueError)` - If the storage fails
    async fn read(&self) -> Result<String, QueueError>;

    /// Number of messages currently queued.
    async fn len(&self) -> Result<usize, QueueError>;

    /// Whether the queue currently holds no messages.
    async fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.len().await? == 0)
    }

    /// Drop every queued message.
    async fn delete_all(&self) -> Result<(), QueueError>;
}

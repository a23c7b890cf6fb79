//! In-memory FIFO queue.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::QueueError;
use crate::interfaces::QueueTransport;

/// A process-local queue backed by a `VecDeque`.
pub struct InMemoryQueue {
    name: String,
    messages: Mutex<VecDeque<String>>,
}

impl InMemoryQueue {
    /// Create an empty queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Create a queue pre-filled with messages, oldest first.
    pub fn with_messages<I, S>(name: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            messages: Mutex::new(messages.into_iter().map(Into::into).collect()),
        }
    }

    /// Copy of the queued messages, oldest first, without consuming them.
    pub fn snapshot(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<String>>, QueueError> {
        self.messages
            .lock()
            .map_err(|e| QueueError::storage(format!("Queue lock poisoned: {}", e)))
    }
}

#[async_trait]
impl QueueTransport for InMemoryQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&self, message: &str) -> Result<(), QueueError> {
        self.lock()?.push_back(message.to_string());
        Ok(())
    }

    async fn read(&self) -> Result<String, QueueError> {
        self.lock()?
            .pop_front()
            .ok_or_else(|| QueueError::empty(&self.name))
    }

    async fn len(&self) -> Result<usize, QueueError> {
        Ok(self.lock()?.len())
    }

    async fn delete_all(&self) -> Result<(), QueueError> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = InMemoryQueue::new("test");
        queue.write("update:t.1").await.unwrap();
        queue.write("update:t.2").await.unwrap();

        assert_eq!(queue.len().await.unwrap(), 2);
        assert_eq!(queue.read().await.unwrap(), "update:t.1");
        assert_eq!(queue.read().await.unwrap(), "update:t.2");
    }

    #[tokio::test]
    async fn test_read_empty_signals_empty() {
        let queue = InMemoryQueue::new("test");
        let result = queue.read().await;
        assert_eq!(result, Err(QueueError::Empty("test".to_string())));
        assert!(result.unwrap_err().is_empty_signal());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let queue = InMemoryQueue::with_messages("test", ["update:t.1", "delete:t.2"]);
        assert!(!queue.is_empty().await.unwrap());

        queue.delete_all().await.unwrap();

        assert!(queue.is_empty().await.unwrap());
        assert!(queue.snapshot().is_empty());
    }
}

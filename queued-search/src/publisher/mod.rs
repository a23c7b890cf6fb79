//! Publisher module.
//!
//! The enqueue side: whatever notices an entity change (a lifecycle hook, a
//! CDC stream, a request handler) calls the publisher, which encodes the
//! notification and appends it to the queue. Appending is cheap, so the
//! caller never waits for the index.

use std::sync::Arc;

use queued_search_repository::QueueTransport;
use queued_search_shared::{Action, EntityIdentifier, Notification};
use tracing::debug;

use crate::errors::PublishError;

/// Writes change notifications to the queue.
#[derive(Clone)]
pub struct NotificationPublisher {
    queue: Arc<dyn QueueTransport>,
}

impl NotificationPublisher {
    /// Create a publisher writing to `queue`.
    pub fn new(queue: Arc<dyn QueueTransport>) -> Self {
        Self { queue }
    }

    /// Enqueue a notification for an identifier.
    ///
    /// The identifier must split into entity type and primary key; a malformed
    /// one is rejected here rather than dropped later by the processor.
    pub async fn enqueue(&self, action: Action, identifier: &str) -> Result<(), PublishError> {
        EntityIdentifier::parse(identifier)?;

        let message = Notification::new(action, identifier).encode();
        self.queue.write(&message).await?;

        debug!(queue = %self.queue.name(), message = %message, "Enqueued notification");
        Ok(())
    }

    /// Enqueue an update for an entity that was created or modified.
    pub async fn enqueue_update(&self, identifier: &str) -> Result<(), PublishError> {
        self.enqueue(Action::Update, identifier).await
    }

    /// Enqueue a delete for an entity that was removed.
    pub async fn enqueue_delete(&self, identifier: &str) -> Result<(), PublishError> {
        self.enqueue(Action::Delete, identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queued_search_repository::InMemoryQueue;

    #[tokio::test]
    async fn test_enqueue_writes_wire_messages() {
        let queue = Arc::new(InMemoryQueue::new("test"));
        let publisher = NotificationPublisher::new(queue.clone());

        publisher.enqueue_update("notes.note.1").await.unwrap();
        publisher.enqueue_update("notes.note.2").await.unwrap();
        publisher.enqueue_delete("notes.note.1").await.unwrap();

        assert_eq!(
            queue.snapshot(),
            vec![
                "update:notes.note.1",
                "update:notes.note.2",
                "delete:notes.note.1"
            ]
        );
    }

    #[tokio::test]
    async fn test_enqueue_rejects_malformed_identifier() {
        let queue = Arc::new(InMemoryQueue::new("test"));
        let publisher = NotificationPublisher::new(queue.clone());

        let result = publisher.enqueue_update("wtfmate").await;

        assert!(matches!(result, Err(PublishError::IdentifierError(_))));
        assert!(queue.snapshot().is_empty());
    }
}

//! Queue drain.
//!
//! Reads are destructive, so the whole backlog is consumed up front and the
//! rest of the run works from memory.

use queued_search_repository::{QueueError, QueueTransport};
use queued_search_shared::Notification;
use tracing::{debug, error, instrument};

/// Result of draining a queue.
#[derive(Debug, Default)]
pub struct DrainOutcome {
    /// Decoded notifications, in queue order.
    pub notifications: Vec<Notification>,
    /// Messages that could not be decoded and were dropped.
    pub malformed: usize,
    /// Transport error that cut the drain short, if any.
    pub interrupted: Option<QueueError>,
}

impl DrainOutcome {
    /// Number of messages read from the queue, malformed ones included.
    pub fn read(&self) -> usize {
        self.notifications.len() + self.malformed
    }
}

/// Read from the queue until it signals it is empty.
///
/// Malformed messages are logged and dropped. Any other transport error stops
/// the drain: what was read so far is returned, and the rest stays queued for
/// the next run.
#[instrument(skip(queue), fields(queue_name = %queue.name()))]
pub async fn drain_queue(queue: &dyn QueueTransport) -> DrainOutcome {
    let mut outcome = DrainOutcome::default();

    loop {
        let message = match queue.read().await {
            Ok(message) => message,
            Err(e) if e.is_empty_signal() => break,
            Err(e) => {
                error!(
                    error = %e,
                    drained = outcome.read(),
                    "Failed to read from queue, processing what was drained so far"
                );
                outcome.interrupted = Some(e);
                break;
            }
        };

        debug!(message = %message, "Processing message");

        match Notification::decode(&message) {
            Ok(notification) => {
                debug!(
                    action = %notification.action,
                    identifier = %notification.identifier,
                    "Decoded message"
                );
                outcome.notifications.push(notification);
            }
            Err(e) => {
                error!(message = %message, error = %e, "Unable to parse message, moving on");
                outcome.malformed += 1;
            }
        }
    }

    debug!(
        notifications = outcome.notifications.len(),
        malformed = outcome.malformed,
        "Queue consumed"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use queued_search_repository::InMemoryQueue;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_drain_empty_queue() {
        let queue = InMemoryQueue::new("test");
        let outcome = drain_queue(&queue).await;

        assert!(outcome.notifications.is_empty());
        assert_eq!(outcome.malformed, 0);
        assert!(outcome.interrupted.is_none());
    }

    #[tokio::test]
    async fn test_drain_preserves_order_and_empties_queue() {
        let queue = InMemoryQueue::with_messages(
            "test",
            ["update:t.1", "update:t.2", "delete:t.1", "update:t.3"],
        );

        let outcome = drain_queue(&queue).await;

        assert_eq!(
            outcome.notifications,
            vec![
                Notification::update("t.1"),
                Notification::update("t.2"),
                Notification::delete("t.1"),
                Notification::update("t.3"),
            ]
        );
        assert_eq!(queue.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_drain_drops_malformed_messages() {
        let queue = InMemoryQueue::with_messages(
            "test",
            ["update:t.1", "garbage", "save:t.2", "delete:t.3"],
        );

        let outcome = drain_queue(&queue).await;

        assert_eq!(outcome.notifications.len(), 2);
        assert_eq!(outcome.malformed, 2);
        assert_eq!(outcome.read(), 4);
    }

    #[tokio::test]
    async fn test_second_drain_returns_nothing() {
        let queue = InMemoryQueue::with_messages("test", ["update:t.1"]);

        let first = drain_queue(&queue).await;
        let second = drain_queue(&queue).await;

        assert_eq!(first.notifications.len(), 1);
        assert!(second.notifications.is_empty());
    }

    /// Queue that fails after handing out its first messages.
    struct FlakyQueue {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QueueTransport for FlakyQueue {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn write(&self, message: &str) -> Result<(), QueueError> {
            self.messages.lock().unwrap().push(message.to_string());
            Ok(())
        }

        async fn read(&self) -> Result<String, QueueError> {
            let mut messages = self.messages.lock().unwrap();
            if messages.is_empty() {
                return Err(QueueError::connection("connection reset"));
            }
            Ok(messages.remove(0))
        }

        async fn len(&self) -> Result<usize, QueueError> {
            Ok(self.messages.lock().unwrap().len())
        }

        async fn delete_all(&self) -> Result<(), QueueError> {
            self.messages.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_drain_stops_on_transport_error() {
        let queue = FlakyQueue {
            messages: Mutex::new(vec!["update:t.1".to_string(), "delete:t.2".to_string()]),
        };

        let outcome = drain_queue(&queue).await;

        assert_eq!(outcome.notifications.len(), 2);
        assert!(matches!(
            outcome.interrupted,
            Some(QueueError::ConnectionError(_))
        ));
    }
}

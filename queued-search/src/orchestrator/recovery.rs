//! Recovery after a failed apply pass.
//!
//! Everything pending that was not confirmed applied is written back to the
//! queue with its original verb, so the next run picks it up again.

use std::fmt;

use queued_search_repository::QueueTransport;
use queued_search_shared::{Action, Notification};
use tracing::error;

use crate::loader::ProcessedSet;
use crate::processor::ActionSet;

/// Counts of notifications written back to the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequeueSummary {
    /// Update notifications re-queued.
    pub updates: usize,
    /// Delete notifications re-queued.
    pub deletes: usize,
    /// Notifications the queue refused to take back.
    pub lost: usize,
}

impl fmt::Display for RequeueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requeued {} updates and {} deletes",
            self.updates, self.deletes
        )?;
        if self.lost > 0 {
            write!(f, ", {} could not be requeued", self.lost)?;
        }
        Ok(())
    }
}

/// `(pending updates ∪ pending deletes) − processed`, with original verbs.
///
/// Updates come first, then deletes, each in the order of their last notification.
pub fn unprocessed(actions: &ActionSet, processed: &ProcessedSet) -> Vec<Notification> {
    let updates = actions
        .updates()
        .into_iter()
        .filter(|id| !processed.contains(id))
        .map(Notification::update);
    let deletes = actions
        .deletes()
        .into_iter()
        .filter(|id| !processed.contains(id))
        .map(Notification::delete);

    updates.chain(deletes).collect()
}

/// Write every unprocessed notification back to the queue.
///
/// A refused write is logged and counted as lost; the remaining writes still
/// go through.
pub async fn requeue(
    queue: &dyn QueueTransport,
    actions: &ActionSet,
    processed: &ProcessedSet,
) -> RequeueSummary {
    let mut summary = RequeueSummary::default();

    for notification in unprocessed(actions, processed) {
        let message = notification.encode();
        match queue.write(&message).await {
            Ok(()) => match notification.action {
                Action::Update => summary.updates += 1,
                Action::Delete => summary.deletes += 1,
            },
            Err(e) => {
                error!(message = %message, error = %e, "Failed to requeue message");
                summary.lost += 1;
            }
        }
    }

    summary
}

//! Error types for the queue processor.

use queued_search_repository::{BackendError, QueueError};
use queued_search_shared::IdentifierError;
use thiserror::Error;

use crate::orchestrator::RequeueSummary;

/// Errors that end a processing run.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The index backend failed while applying; unprocessed work was re-queued.
    #[error("Processing failed ({requeued}): {source}")]
    ApplyFailed {
        /// What was written back to the queue.
        requeued: RequeueSummary,
        /// The backend error that aborted the run.
        #[source]
        source: BackendError,
    },
}

impl ProcessError {
    /// Create an apply failure.
    pub fn apply_failed(requeued: RequeueSummary, source: BackendError) -> Self {
        Self::ApplyFailed { requeued, source }
    }

    /// Re-queue counts attached to the failure.
    pub fn requeued(&self) -> &RequeueSummary {
        match self {
            Self::ApplyFailed { requeued, .. } => requeued,
        }
    }
}

/// Errors that can occur while publishing a notification.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The identifier cannot be split into entity type and primary key.
    #[error("Invalid identifier: {0}")]
    IdentifierError(#[from] IdentifierError),

    /// The queue rejected the message.
    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),
}

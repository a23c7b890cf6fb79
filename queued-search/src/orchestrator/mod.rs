//! Orchestrator module for the queue processor.
//!
//! Runs one pass: drain the queue, reconcile, apply, and recover on failure.

mod recovery;

pub use recovery::{requeue, unprocessed, RequeueSummary};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use queued_search_repository::{IndexRegistry, QueueTransport};
use tracing::{debug, error, field, info, instrument, warn, Span};
use uuid::Uuid;

use crate::config::ProcessorConfig;
use crate::consumer::drain_queue;
use crate::errors::ProcessError;
use crate::loader::{BatchApplier, ProcessedSet};
use crate::processor::Reconciler;

/// Lifecycle of a processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run started yet.
    Idle,
    /// Reading the queue into memory.
    Draining,
    /// Collapsing notifications into net actions.
    Reconciling,
    /// Sending work to the index backends.
    Applying,
    /// The run finished successfully.
    Completed,
    /// A backend error aborted the run; unprocessed work was re-queued.
    Failed,
}

impl RunState {
    /// Whether the run is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Draining => "draining",
            Self::Reconciling => "reconciling",
            Self::Applying => "applying",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Identifier of the run, also attached to its log span.
    pub run_id: Uuid,
    /// Final state (always `Completed` for a returned report).
    pub state: RunState,
    /// Notifications decoded from the queue.
    pub drained: usize,
    /// Messages dropped because they could not be decoded.
    pub malformed: usize,
    /// Identifiers (re)indexed.
    pub updated: usize,
    /// Identifiers removed from the index.
    pub deleted: usize,
    /// Identifiers left unprocessed by per-item errors.
    pub skipped: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run ended.
    pub finished_at: DateTime<Utc>,
}

/// Drains a queue and applies its notifications to the index.
///
/// One call to [`QueueProcessor::run`] is one pass. Runs against the same
/// queue must not overlap.
pub struct QueueProcessor {
    queue: Arc<dyn QueueTransport>,
    reconciler: Reconciler,
    applier: BatchApplier,
    state: RunState,
}

impl QueueProcessor {
    /// Create a processor over a queue and an applier.
    pub fn new(queue: Arc<dyn QueueTransport>, applier: BatchApplier) -> Self {
        Self {
            queue,
            reconciler: Reconciler::new(),
            applier,
            state: RunState::Idle,
        }
    }

    /// Create a processor from configuration and a registry.
    pub fn with_config(
        queue: Arc<dyn QueueTransport>,
        registry: IndexRegistry,
        config: &ProcessorConfig,
    ) -> Self {
        Self::new(
            queue,
            BatchApplier::with_batch_size(registry, config.batch_size),
        )
    }

    /// State of the current or last run.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The queue this processor drains.
    pub fn queue(&self) -> &Arc<dyn QueueTransport> {
        &self.queue
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "Run state transition");
        self.state = next;
    }

    /// Run one pass over the queue.
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - If every backend call succeeded
    /// * `Err(ProcessError::ApplyFailed)` - If a backend failed; unprocessed
    ///   notifications were written back to the queue first
    #[instrument(skip(self), fields(run_id = tracing::field::Empty, queue = %self.queue.name()))]
    pub async fn run(&mut self) -> Result<RunReport, ProcessError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        Span::current().record("run_id", field::display(run_id));
        self.state = RunState::Idle;

        match self.queue.len().await {
            Ok(0) => info!("Queue is empty, nothing to process"),
            Ok(queued) => info!(queued = queued, "Starting to process the queue"),
            Err(e) => warn!(error = %e, "Could not read queue length, draining anyway"),
        }

        self.transition(RunState::Draining);
        let drained = drain_queue(self.queue.as_ref()).await;

        self.transition(RunState::Reconciling);
        let actions = self.reconciler.reconcile(&drained.notifications);
        info!(
            drained = drained.notifications.len(),
            malformed = drained.malformed,
            updates = actions.update_count(),
            deletes = actions.delete_count(),
            "Queue consumed"
        );

        self.transition(RunState::Applying);
        let mut processed = ProcessedSet::new();

        match self.applier.apply(&actions, &mut processed).await {
            Ok(summary) => {
                self.transition(RunState::Completed);
                info!(
                    updated = summary.updated,
                    deleted = summary.deleted,
                    skipped = summary.skipped,
                    "Processing complete"
                );

                Ok(RunReport {
                    run_id,
                    state: self.state,
                    drained: drained.notifications.len(),
                    malformed: drained.malformed,
                    updated: summary.updated,
                    deleted: summary.deleted,
                    skipped: summary.skipped,
                    started_at,
                    finished_at: Utc::now(),
                })
            }
            Err(source) => {
                self.transition(RunState::Failed);
                error!(error = %source, "Exception seen during processing, requeuing unprocessed messages");

                let requeued = requeue(self.queue.as_ref(), &actions, &processed).await;
                error!(
                    requeued_updates = requeued.updates,
                    requeued_deletes = requeued.deletes,
                    lost = requeued.lost,
                    "Requeued unprocessed messages"
                );

                Err(ProcessError::apply_failed(requeued, source))
            }
        }
    }
}

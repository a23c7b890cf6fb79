//! # Queued Search
//!
//! Keeps search indexes in sync with the database through a queue of change
//! notifications. Writers enqueue `update:<identifier>` or
//! `delete:<identifier>` messages; a processing run drains the queue and
//! applies the net effect to the index in batches.
//!
//! ## Architecture
//!
//! A run follows the Consumer-Processor-Loader pattern:
//!
//! 1. **Consumer**: Drains the queue into memory
//! 2. **Processor**: Reconciles notifications into one action per identifier
//! 3. **Loader**: Applies actions to the index backends, grouped by entity type
//! 4. **Orchestrator**: Coordinates the run and re-queues unprocessed work on failure
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`consumer`]: Queue draining
//! - [`processor`]: Notification reconciliation
//! - [`loader`]: Batched application to the index
//! - [`orchestrator`]: Run lifecycle and recovery
//! - [`publisher`]: Enqueuing notifications
//! - [`errors`]: Error types for processing and publishing

pub mod config;
pub mod consumer;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod publisher;

pub use config::{Dependencies, ProcessorConfig};
pub use errors::{ProcessError, PublishError};
pub use orchestrator::{QueueProcessor, RunReport, RunState};
pub use publisher::NotificationPublisher;

use thiserror::Error;

/// Errors that can occur during initialization or a processing run.
#[derive(Error, Debug)]
pub enum QueuedSearchError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Processing error.
    #[error("Processing error: {0}")]
    ProcessError(#[from] ProcessError),
}

impl QueuedSearchError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

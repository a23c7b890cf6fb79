//! Processor module for the queue processor.
//!
//! Reconciles the drained notifications into one net action per identifier.

mod reconciler;

pub use reconciler::{ActionSet, Reconciler};

//! Consumer module for the queue processor.
//!
//! Drains the queue into memory, decoding each wire message on the way.

mod drain;

pub use drain::{drain_queue, DrainOutcome};

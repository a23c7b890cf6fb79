//! Configuration and dependency wiring for the queue processor.
//!
//! The library only takes explicit configuration; reading the environment is
//! left to [`ProcessorConfig::from_env`] and [`Dependencies`], used by the binary.

mod dependencies;
mod entity_types;

pub use dependencies::{ConnectionMode, Dependencies};
pub use entity_types::IndexedEntityType;

use std::env;
use tracing::warn;

use crate::loader::DEFAULT_BATCH_SIZE;

/// Default queue name.
pub const DEFAULT_QUEUE_NAME: &str = "search_queue";

/// Configuration of a processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Name of the queue to drain.
    pub queue_name: String,
    /// Maximum number of instances per bulk update.
    pub batch_size: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            queue_name: DEFAULT_QUEUE_NAME.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ProcessorConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_QUEUE_NAME`: Queue name (default: search_queue)
    /// - `SEARCH_QUEUE_BATCH_SIZE`: Instances per bulk update (default: 1000)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Read the configuration through a variable lookup function.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let queue_name = lookup("SEARCH_QUEUE_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string());

        let batch_size = match lookup("SEARCH_QUEUE_BATCH_SIZE") {
            None => DEFAULT_BATCH_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warn!(value = %raw, "Invalid SEARCH_QUEUE_BATCH_SIZE, using default");
                    DEFAULT_BATCH_SIZE
                }
            },
        };

        Self {
            queue_name,
            batch_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::from_vars(lookup(&[]));
        assert_eq!(config, ProcessorConfig::default());
        assert_eq!(config.queue_name, "search_queue");
        assert_eq!(config.batch_size, 1000);
    }

    #[test]
    fn test_overrides() {
        let config = ProcessorConfig::from_vars(lookup(&[
            ("SEARCH_QUEUE_NAME", "notes_queue"),
            ("SEARCH_QUEUE_BATCH_SIZE", "250"),
        ]));
        assert_eq!(config.queue_name, "notes_queue");
        assert_eq!(config.batch_size, 250);
    }

    #[test]
    fn test_invalid_batch_size_falls_back() {
        for raw in ["0", "-5", "lots", ""] {
            let config = ProcessorConfig::from_vars(lookup(&[("SEARCH_QUEUE_BATCH_SIZE", raw)]));
            assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE, "value {:?}", raw);
        }
    }
}

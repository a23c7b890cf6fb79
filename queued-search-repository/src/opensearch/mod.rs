//! OpenSearch implementation of the index backend.
//!
//! Each entity type gets its own versioned index behind an alias.

mod backend;
mod index_config;

pub use backend::OpenSearchBackend;
pub use index_config::{get_index_settings, IndexConfig};

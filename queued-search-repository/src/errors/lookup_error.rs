//! Entity store lookup error types.

use thiserror::Error;

/// Errors raised while fetching an entity instance.
///
/// Lookup errors only affect the identifier being fetched. That identifier is
/// skipped and left unprocessed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No entity exists for the primary key.
    #[error("No {entity_type} with primary key '{primary_key}'")]
    NotFound {
        entity_type: String,
        primary_key: String,
    },

    /// More than one entity matched the primary key.
    #[error("More than one {entity_type} with primary key '{primary_key}'")]
    Ambiguous {
        entity_type: String,
        primary_key: String,
    },

    /// The backing store could not answer.
    #[error("Store error: {0}")]
    StoreError(String),
}

impl LookupError {
    /// Create a not found error.
    pub fn not_found(entity_type: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            primary_key: primary_key.into(),
        }
    }

    /// Create an ambiguous result error.
    pub fn ambiguous(entity_type: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self::Ambiguous {
            entity_type: entity_type.into(),
            primary_key: primary_key.into(),
        }
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }
}

impl From<sqlx::Error> for LookupError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreError(err.to_string())
    }
}

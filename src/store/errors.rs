//! Store error types
//!
//! Every variant reaches HTTP clients only as a generic internal error;
//! the detail here is for logs.

use std::io;

use thiserror::Error;

use crate::shoe::ShoeId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence backend failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the collection lock
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Save or delete of a record that is no longer stored
    #[error("shoe {0} is not in the store")]
    Missing(ShoeId),

    /// Disk I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Checksum or framing failure in the document log
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// Document body could not be encoded or decoded
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Blocking I/O task panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(String),

    /// Connection string names no known backend
    #[error("unsupported connection string {0:?}: expected memory:// or file://<path>")]
    UnsupportedConnection(String),
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }
}

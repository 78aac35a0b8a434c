//! Error types for cache operations

use thiserror::Error;

/// Main error type for all cache operations
///
/// The error is `Clone` because a settled shared promise hands a copy of
/// its output to every awaiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The producer function failed
    #[error("producer error: {0}")]
    Producer(String),

    /// The storage collaborator failed
    #[error("store error: {0}")]
    Store(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Wrap an arbitrary producer failure
    pub fn producer(msg: impl ToString) -> Self {
        CacheError::Producer(msg.to_string())
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

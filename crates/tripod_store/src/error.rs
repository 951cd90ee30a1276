//! Error types for statement store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during statement store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A snapshot could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A write addressed a blank subject or graph.
    #[error("invalid key: subject {subject:?} in graph {graph:?}")]
    InvalidKey {
        /// The subject of the rejected write.
        subject: String,
        /// The graph of the rejected write.
        graph: String,
    },

    /// A replacement carried statements about a different subject.
    #[error("statement subject {found:?} does not match replaced subject {expected:?}")]
    SubjectMismatch {
        /// The subject being replaced.
        expected: String,
        /// The subject found on one of the statements.
        found: String,
    },

    /// The store refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates an invalid key error.
    pub fn invalid_key(subject: impl Into<String>, graph: impl Into<String>) -> Self {
        Self::InvalidKey {
            subject: subject.into(),
            graph: graph.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

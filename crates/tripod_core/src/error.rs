//! Error types for Tripod core.

use crate::transaction::TransactionState;
use crate::types::TransactionId;
use crate::validation::Errors;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Tripod core operations.
///
/// Per-field validation problems are not errors: `save` reports them by
/// returning `false` and filling [`crate::Resource::errors`]. Only
/// `save_strict` turns them into [`CoreError::ValidationFailed`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// Statement store error, propagated unchanged.
    #[error("store error: {0}")]
    Store(#[from] tripod_store::StoreError),

    /// A strict save was attempted on an invalid resource.
    #[error("validation failed: {errors}")]
    ValidationFailed {
        /// The errors reported by validation.
        errors: Errors,
    },

    /// The store holds no statements for the requested resource.
    #[error("resource not found: <{uri}> in graph <{graph}>")]
    ResourceNotFound {
        /// The URI that was looked up.
        uri: String,
        /// The graph that was searched.
        graph: String,
    },

    /// The transaction was already committed or aborted.
    #[error("transaction {id} is already {state}")]
    TransactionClosed {
        /// The transaction that was reused.
        id: TransactionId,
        /// Its terminal state.
        state: TransactionState,
    },

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why operation is invalid.
        message: String,
    },
}

impl CoreError {
    /// Creates a validation failed error.
    pub fn validation_failed(errors: Errors) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Creates a resource not found error.
    pub fn resource_not_found(uri: impl Into<String>, graph: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            uri: uri.into(),
            graph: graph.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Checks if this error is a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

//! Core type definitions for Tripod.

use std::fmt;
use uuid::Uuid;

/// Unique identifier for a transaction.
///
/// Transactions can be created without a repository, so identifiers are
/// random rather than allocated from a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random transaction ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn:{}", self.0)
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_unique() {
        assert_ne!(TransactionId::new(), TransactionId::new());
    }

    #[test]
    fn display_has_prefix() {
        let id = TransactionId::from(Uuid::nil());
        assert_eq!(
            format!("{id}"),
            "txn:00000000-0000-0000-0000-000000000000"
        );
    }
}

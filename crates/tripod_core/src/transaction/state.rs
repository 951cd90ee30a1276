//! Transaction state.

use crate::error::{CoreError, CoreResult};
use crate::types::TransactionId;
use std::fmt;
use tracing::{debug, info};
use tripod_store::{render_update, Mutation, StatementStore};

/// State of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Transaction is accepting writes.
    Open,
    /// Transaction has been committed.
    Committed,
    /// Transaction has been aborted.
    Aborted,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        })
    }
}

/// Summary of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// The committed transaction.
    pub transaction: TransactionId,
    /// Number of mutation units applied.
    pub mutations: usize,
}

/// An ordered buffer of pending store mutations.
///
/// Transactions are owned by whoever creates them and are lent to
/// [`crate::Repository`] writes through `WriteTarget::Buffered(&mut txn)`,
/// so appends and the terminal commit or abort can never overlap.
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    state: TransactionState,
    pending: Vec<Mutation>,
    applied_query: Option<String>,
}

impl Transaction {
    /// Creates a new, empty, open transaction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: TransactionId::new(),
            state: TransactionState::Open,
            pending: Vec::new(),
            applied_query: None,
        }
    }

    /// Returns the transaction ID.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Checks if the transaction still accepts writes.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == TransactionState::Open
    }

    /// Returns the pending mutations in contribution order.
    #[must_use]
    pub fn pending(&self) -> &[Mutation] {
        &self.pending
    }

    /// Returns the number of pending mutations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Checks if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the update text of the pending buffer.
    ///
    /// Empty when nothing is pending, including after commit and abort.
    #[must_use]
    pub fn query(&self) -> String {
        render_update(&self.pending)
    }

    /// Returns the update text applied by a successful commit.
    #[must_use]
    pub fn applied_query(&self) -> Option<&str> {
        self.applied_query.as_deref()
    }

    /// Appends a mutation to the buffer.
    pub(crate) fn push(&mut self, mutation: Mutation) -> CoreResult<()> {
        self.ensure_open()?;
        debug!(
            txn = %self.id,
            subject = mutation.subject(),
            graph = mutation.graph(),
            "buffered mutation"
        );
        self.pending.push(mutation);
        Ok(())
    }

    /// Applies the buffer to `store` as one batch.
    ///
    /// On store failure the error is returned unchanged and the transaction
    /// stays open with its buffer intact.
    pub(crate) fn commit_to(
        &mut self,
        store: &dyn StatementStore,
        retain_query: bool,
    ) -> CoreResult<CommitReceipt> {
        self.ensure_open()?;

        let mutations = self.pending.len();
        if mutations > 0 {
            store.apply_batch(&self.pending)?;
        }

        let pending = std::mem::take(&mut self.pending);
        if retain_query {
            self.applied_query = Some(render_update(&pending));
        }
        self.state = TransactionState::Committed;
        info!(txn = %self.id, mutations, "transaction committed");

        Ok(CommitReceipt {
            transaction: self.id,
            mutations,
        })
    }

    /// Discards the buffer without touching any store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionClosed`] if the transaction was
    /// already committed or aborted.
    pub fn abort(&mut self) -> CoreResult<()> {
        self.ensure_open()?;
        let discarded = self.pending.len();
        self.pending.clear();
        self.state = TransactionState::Aborted;
        info!(txn = %self.id, discarded, "transaction aborted");
        Ok(())
    }

    fn ensure_open(&self) -> CoreResult<()> {
        match self.state {
            TransactionState::Open => Ok(()),
            state => Err(CoreError::TransactionClosed { id: self.id, state }),
        }
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

//! In-memory statement store for testing.

use crate::error::StoreResult;
use crate::map::StatementMap;
use crate::mutation::Mutation;
use crate::statement::StatementSet;
use crate::store::StatementStore;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// An in-memory statement store.
///
/// This store keeps all statements in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral data that doesn't need persistence
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads. A batch is
/// applied under a single write guard, so readers see either none or all
/// of it.
///
/// # Example
///
/// ```rust
/// use tripod_store::{InMemoryStore, StatementStore};
///
/// let store = InMemoryStore::new();
/// store.delete("http://uri", "http://graph").unwrap();
/// assert!(store.query("http://uri", "http://graph").unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StatementMap>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of statements across all graphs.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.data.read().statement_count()
    }

    /// Returns the graphs that currently hold statements.
    #[must_use]
    pub fn graphs(&self) -> BTreeSet<String> {
        self.data.read().graphs()
    }

    /// Removes every statement from the store.
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl StatementStore for InMemoryStore {
    fn insert_or_replace(
        &self,
        subject: &str,
        graph: &str,
        statements: &StatementSet,
    ) -> StoreResult<()> {
        let mutation = Mutation::replace(subject, graph, statements.clone());
        mutation.check()?;
        self.data.write().apply(&mutation);
        Ok(())
    }

    fn delete(&self, subject: &str, graph: &str) -> StoreResult<()> {
        let mutation = Mutation::delete(subject, graph);
        mutation.check()?;
        self.data.write().apply(&mutation);
        Ok(())
    }

    fn query(&self, subject: &str, graph: &str) -> StoreResult<StatementSet> {
        Ok(self.data.read().get(subject, graph))
    }

    fn apply_batch(&self, batch: &[Mutation]) -> StoreResult<()> {
        self.data.write().apply_all(batch)
    }
}

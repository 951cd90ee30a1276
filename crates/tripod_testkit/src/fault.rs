//! Fault injection for store failure tests.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tripod_store::{
    InMemoryStore, Mutation, StatementSet, StatementStore, StoreError, StoreResult,
};

/// An in-memory store whose writes can be made to fail on demand.
///
/// Every batch that reaches the store is recorded, whether it failed or
/// not, so tests can assert how many round trips a commit made.
#[derive(Debug, Default)]
pub struct FaultyStore {
    inner: InMemoryStore,
    failing: AtomicBool,
    batches: Mutex<Vec<usize>>,
}

impl FaultyStore {
    /// Creates a healthy store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every following write fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the size of every batch received, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().clone()
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::unavailable("injected failure"))
        } else {
            Ok(())
        }
    }
}

impl StatementStore for FaultyStore {
    fn insert_or_replace(
        &self,
        subject: &str,
        graph: &str,
        statements: &StatementSet,
    ) -> StoreResult<()> {
        self.check()?;
        self.inner.insert_or_replace(subject, graph, statements)
    }

    fn delete(&self, subject: &str, graph: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.delete(subject, graph)
    }

    fn query(&self, subject: &str, graph: &str) -> StoreResult<StatementSet> {
        self.inner.query(subject, graph)
    }

    fn apply_batch(&self, batch: &[Mutation]) -> StoreResult<()> {
        self.batches.lock().push(batch.len());
        self.check()?;
        self.inner.apply_batch(batch)
    }
}

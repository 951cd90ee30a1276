//! Statement store trait definition.

use crate::error::StoreResult;
use crate::mutation::Mutation;
use crate::statement::StatementSet;

/// A statement store partitioned into named graphs.
///
/// Stores address statements by `(subject, graph)` pairs. Tripod never asks
/// a store for anything finer than that: a resource's entire state is the
/// set of statements sharing its subject inside its graph.
///
/// # Invariants
///
/// - `insert_or_replace` is idempotent and leaves exactly the given set
/// - `delete` of an unknown pair is a no-op
/// - `query` returns only committed state, or an empty set
/// - `apply_batch` applies every unit or none of them; readers never
///   observe a partially applied batch
/// - Stores must be `Send + Sync` so one store can back many repositories
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FileStore`] - For persistent storage
pub trait StatementStore: Send + Sync {
    /// Replaces every statement of `subject` in `graph` with `statements`.
    ///
    /// An empty set removes the subject from the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank, a statement is about another
    /// subject, or the store cannot persist the change.
    fn insert_or_replace(
        &self,
        subject: &str,
        graph: &str,
        statements: &StatementSet,
    ) -> StoreResult<()>;

    /// Removes every statement of `subject` in `graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the store cannot persist the
    /// change.
    fn delete(&self, subject: &str, graph: &str) -> StoreResult<()>;

    /// Returns the committed statements of `subject` in `graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn query(&self, subject: &str, graph: &str) -> StoreResult<StatementSet>;

    /// Applies an ordered batch of mutations as one atomic unit.
    ///
    /// Later units for the same `(subject, graph)` supersede earlier ones.
    ///
    /// # Errors
    ///
    /// Returns an error if any unit is invalid or the store cannot persist
    /// the batch. In that case no unit has been applied.
    fn apply_batch(&self, batch: &[Mutation]) -> StoreResult<()>;
}

//! # Tripod Store
//!
//! Statement model and statement store implementations for Tripod.
//!
//! This crate is the lowest layer of Tripod. A statement store holds
//! subject–predicate–object statements partitioned into named graphs and
//! exposes exactly four operations:
//!
//! - `insert_or_replace` - replace every statement of a subject in a graph
//! - `delete` - remove every statement of a subject in a graph
//! - `query` - read the committed statements of a subject in a graph
//! - `apply_batch` - apply an ordered list of [`Mutation`]s atomically
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral data
//! - [`FileStore`] - JSON snapshot on disk, rewritten atomically per write
//!
//! ## Example
//!
//! ```rust
//! use tripod_store::{InMemoryStore, Statement, StatementSet, StatementStore, Term};
//!
//! let store = InMemoryStore::new();
//! let mut set = StatementSet::new();
//! set.insert(Statement::new("http://uri", "http://pred", Term::iri("http://obj")));
//!
//! store.insert_or_replace("http://uri", "http://graph", &set).unwrap();
//! assert_eq!(store.query("http://uri", "http://graph").unwrap(), set);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod map;
mod memory;
mod mutation;
mod statement;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use mutation::{render_update, Mutation};
pub use statement::{Statement, StatementSet, Term};
pub use store::StatementStore;

//! # Tripod Core
//!
//! Resource persistence over a graph-partitioned statement store.
//!
//! This crate provides:
//! - [`Resource`] - an entity identified by a URI, living in one graph,
//!   whose attributes are the statements sharing its subject
//! - Required-field validation with a per-attribute [`Errors`] map
//! - [`Repository`] - save, destroy, find and hydrate resources
//! - [`Transaction`] - buffered writes committed atomically or discarded
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tripod_core::{Config, Repository, WriteTarget};
//! use tripod_store::InMemoryStore;
//!
//! let repo = Repository::with_config(
//!     Arc::new(InMemoryStore::new()),
//!     Config::new().default_graph_uri("http://graph"),
//! );
//!
//! let mut person = repo.resource("http://people/1");
//! person.set("http://name", "Ada");
//!
//! let mut txn = repo.begin();
//! assert!(repo.save(&mut person, WriteTarget::Buffered(&mut txn)).unwrap());
//! assert!(repo.find("http://people/1").is_err());
//!
//! repo.commit(&mut txn).unwrap();
//! let found = repo.find("http://people/1").unwrap();
//! assert_eq!(found.get("http://name")[0].as_str(), "Ada");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod repository;
mod resource;
mod transaction;
mod types;
pub mod validation;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use repository::{Repository, WriteTarget};
pub use resource::Resource;
pub use transaction::{CommitReceipt, Transaction, TransactionState};
pub use types::TransactionId;
pub use validation::{validate, Errors};

//! # Tripod Testkit
//!
//! Test utilities for Tripod.
//!
//! This crate provides:
//! - Repository fixtures backed by in-memory or file stores
//! - The saved/unsaved person fixtures used across the persistence tests
//! - Property-based test generators using proptest
//! - A fault-injecting store for commit failure tests
//! - One-shot tracing setup for test output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tripod_testkit::prelude::*;
//!
//! #[test]
//! fn saves_person() {
//!     let repo = TestRepository::memory();
//!     let mut person = unsaved_person();
//!     assert!(repo.save(&mut person, WriteTarget::Immediate).unwrap());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fault;
pub mod fixtures;
pub mod generators;
pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fault::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
    pub use tripod_core::{Repository, Resource, Transaction, WriteTarget};
}

pub use fault::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;

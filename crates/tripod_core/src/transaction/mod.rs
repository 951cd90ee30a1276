//! Buffered, atomically committed writes.
//!
//! A transaction collects the mutations of successful `save` and `destroy`
//! calls made with [`crate::WriteTarget::Buffered`]:
//! - **Atomicity**: the whole buffer reaches the store in one batch, or none of it
//! - **Isolation**: buffered writes are invisible until commit
//! - **Failure isolation**: a rejected save contributes nothing and leaves
//!   the transaction usable

mod state;

pub use state::{CommitReceipt, Transaction, TransactionState};

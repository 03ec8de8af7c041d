//! The order collection, its mutations, and statistics.
//!
//! The ledger owns the in-memory record sequence and persists through the
//! [`store::OrderStore`] seam: load once on open, save the whole collection
//! after every successful mutation.

pub mod ledger;
pub mod stats;
pub mod store;

pub use ledger::{Ledger, LedgerError};
pub use stats::Statistics;
pub use store::{InMemoryStore, OrderStore, StoreError};

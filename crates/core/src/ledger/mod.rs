//! Ledger facade: the entries the engine consumes and the collaborators that
//! serve them.
//!
//! This module defines:
//! - Money entries (income/expense records)
//! - The async query facade over the external ledger store
//! - Category lookup with optional display enrichment
//! - An in-memory store implementing both collaborators

pub mod category;
pub mod entry;
pub mod error;
pub mod memory;
pub mod query;

pub use category::{CategoryDirectory, CategoryDisplay, CategoryInfo, CategoryLookup};
pub use entry::{EntryKind, MoneyEntry};
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use query::{LedgerFilter, LedgerQuery};

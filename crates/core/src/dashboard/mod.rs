//! Dashboard composition.
//!
//! A dashboard gathers fixed windows (today, the current month, the last N
//! days and a rolling run of calendar months) into one payload:
//! - Overview with month budget usage
//! - Top income and expense categories
//! - Recent records
//! - Daily balance trend and rolling monthly trend
//! - Budget alerts

pub mod composer;
pub mod types;

#[cfg(test)]
mod tests;

pub use composer::{DashboardComposer, RECENT_RECORDS_LIMIT};
pub use types::*;

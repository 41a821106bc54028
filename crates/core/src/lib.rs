//! Core statistics and budget logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Ledger entries and category names arrive through async collaborator traits;
//! everything computed from them lives here.
//!
//! # Modules
//!
//! - `period` - Calendar ranges, bucket keys and budget period resolution
//! - `ledger` - Money entries and the ledger/category collaborators
//! - `aggregation` - Bucketed totals and category shares
//! - `trend` - Gap-filled series, summary statistics and period comparison
//! - `reports` - Overview, daily/monthly/yearly and category reports
//! - `budget` - Budget status, alerts and summaries
//! - `dashboard` - Multi-section dashboard composition

pub mod aggregation;
pub mod budget;
pub mod dashboard;
pub mod ledger;
pub mod period;
pub mod reports;
pub mod trend;

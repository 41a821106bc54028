//! Folding ledger entries into time buckets and category groupings.

pub mod aggregator;
pub mod types;


pub use aggregator::Aggregator;
pub use types::{AggregateBucket, BucketMap, CategoryBreakdown, CategoryShare, Totals};

//! Statistics report generation.
//!
//! This module turns ledger queries into the reportable payloads:
//! - Overview (today and month to date)
//! - Daily, monthly and yearly figures
//! - Category breakdowns
//! - Daily trends with summary statistics
//! - Month and category-set comparisons

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;

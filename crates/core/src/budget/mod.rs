//! Budget evaluation and budget reports.

pub mod error;
pub mod reporter;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use reporter::BudgetReporter;
pub use service::BudgetService;
pub use types::{
    AlertLevel, AlertList, AlertType, BudgetAlert, BudgetDefinition, BudgetList, BudgetScope,
    BudgetStatus, BudgetSummary, DEFAULT_ALERT_THRESHOLD,
};

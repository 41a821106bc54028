//! Period resolution and calendar arithmetic.

pub mod calendar;
pub mod error;
pub mod resolver;

pub use calendar::{BucketKey, DateRange, Granularity, first_day_of_month, last_day_of_month, shift_month};
pub use error::PeriodError;
pub use resolver::{PeriodMode, PeriodResolver, PeriodSpec};

//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{percent_change, percent_of, round_money, round2, round2_opt};

//! Summary statistics over a series.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{percent_change, round2, round2_opt};

/// Average, extrema and split-half growth of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Mean value; 0 for an empty series.
    #[serde(serialize_with = "round2")]
    pub average: Decimal,
    /// Largest value; 0 for an empty series.
    #[serde(serialize_with = "round2")]
    pub max: Decimal,
    /// Smallest value; 0 for an empty series.
    #[serde(serialize_with = "round2")]
    pub min: Decimal,
    /// Percentage change between the halves' means, when defined.
    #[serde(serialize_with = "round2_opt")]
    pub growth_rate: Option<Decimal>,
}

impl SeriesStats {
    /// Computes every statistic over `values`.
    #[must_use]
    pub fn of(values: &[Decimal]) -> Self {
        Self {
            average: average(values),
            max: values.iter().copied().max().unwrap_or(Decimal::ZERO),
            min: values.iter().copied().min().unwrap_or(Decimal::ZERO),
            growth_rate: growth_rate(values),
        }
    }
}

/// Arithmetic mean, defined as 0 for an empty slice.
#[must_use]
pub fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

/// Split-half growth rate.
///
/// The series splits at `floor(n / 2)`; the result is the percentage change
/// from the first half's mean to the second half's, relative to the first.
/// Absent for fewer than two points or a zero first-half mean.
#[must_use]
pub fn growth_rate(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let (first, second) = values.split_at(values.len() / 2);
    percent_change(average(first), average(second))
}

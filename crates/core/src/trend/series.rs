//! Gap-filled time series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::round2;

use crate::aggregation::AggregateBucket;
use crate::ledger::EntryKind;

/// Which figure of a bucket a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMetric {
    /// Income only.
    Income,
    /// Expense only.
    Expense,
    /// Income minus expense.
    Balance,
}

impl SeriesMetric {
    /// Income or expense for a kind, balance when no kind is given.
    #[must_use]
    pub const fn for_kind(kind: Option<EntryKind>) -> Self {
        match kind {
            Some(EntryKind::Income) => Self::Income,
            Some(EntryKind::Expense) => Self::Expense,
            None => Self::Balance,
        }
    }

    /// Extracts the plotted value from a bucket.
    #[must_use]
    pub fn value_of(self, bucket: &AggregateBucket) -> Decimal {
        match self {
            Self::Income => bucket.income,
            Self::Expense => bucket.expense,
            Self::Balance => bucket.balance(),
        }
    }

    /// Wire label (`income`, `expense`, `both`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Balance => "both",
        }
    }
}

/// One point of a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// First day of the bucket.
    pub date: NaiveDate,
    /// Plotted value.
    #[serde(serialize_with = "round2")]
    pub value: Decimal,
}

/// Ordered series with exactly one point per unit of its range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Wraps already ordered, gap-free points.
    #[must_use]
    pub(crate) const fn from_points(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }

    /// The points, oldest first.
    #[must_use]
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// The values, oldest first.
    #[must_use]
    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true for a zero-length series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

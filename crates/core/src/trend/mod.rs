//! Trend series and period comparisons.

pub mod compare;
pub mod series;
pub mod stats;

#[cfg(test)]
mod tests;

pub use compare::{CategorySetDiff, PeriodComparison};
pub use series::{SeriesMetric, TrendPoint, TrendSeries};
pub use stats::SeriesStats;

use crate::aggregation::{AggregateBucket, Aggregator, BucketMap};
use crate::ledger::MoneyEntry;
use crate::period::{DateRange, Granularity};

/// Turns bucket maps into continuous series and compares periods.
pub struct TrendEngine;

impl TrendEngine {
    /// One bucket per `unit` in `range`, zero-filled where `buckets` has none.
    #[must_use]
    pub fn fill_buckets(
        buckets: &BucketMap,
        range: &DateRange,
        unit: Granularity,
    ) -> Vec<AggregateBucket> {
        range
            .units(unit)
            .into_iter()
            .map(|key| AggregateBucket::get_or_zero(buckets, key))
            .collect()
    }

    /// Gap-filled series of `metric` over `range`.
    #[must_use]
    pub fn build_series(
        buckets: &BucketMap,
        range: &DateRange,
        unit: Granularity,
        metric: SeriesMetric,
    ) -> TrendSeries {
        let points = Self::fill_buckets(buckets, range, unit)
            .iter()
            .filter_map(|bucket| {
                bucket.key.start_date().map(|date| TrendPoint {
                    date,
                    value: metric.value_of(bucket),
                })
            })
            .collect();
        TrendSeries::from_points(points)
    }

    /// Aggregates `entries` and builds the series in one step.
    #[must_use]
    pub fn series_from_entries(
        entries: &[MoneyEntry],
        range: &DateRange,
        unit: Granularity,
        metric: SeriesMetric,
    ) -> TrendSeries {
        let buckets = Aggregator::aggregate(entries, unit, Some(range));
        Self::build_series(&buckets, range, unit, metric)
    }

    /// Compares the entries of `current` against those of `baseline`.
    #[must_use]
    pub fn compare(baseline: &[MoneyEntry], current: &[MoneyEntry]) -> PeriodComparison {
        PeriodComparison::between(&Aggregator::totals(baseline), &Aggregator::totals(current))
    }

    /// Category set difference between two entry sets, over nonzero totals.
    #[must_use]
    pub fn category_diff(baseline: &[MoneyEntry], current: &[MoneyEntry]) -> CategorySetDiff {
        CategorySetDiff::between(
            &Aggregator::by_category(baseline, None),
            &Aggregator::by_category(current, None),
        )
    }
}

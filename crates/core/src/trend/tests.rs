//! Tests for trend series, statistics and comparisons.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_shared::types::CategoryId;
use uuid::Uuid;

use super::stats::{average, growth_rate};
use super::{SeriesMetric, SeriesStats, TrendEngine};
use crate::aggregation::{Aggregator, Totals};
use crate::ledger::{EntryKind, MoneyEntry};
use crate::period::{DateRange, Granularity};
use crate::trend::PeriodComparison;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn category(n: u128) -> CategoryId {
    CategoryId::from_uuid(Uuid::from_u128(n))
}

fn expense(amount: Decimal, on: NaiveDate) -> MoneyEntry {
    MoneyEntry::new(amount, EntryKind::Expense, on).unwrap()
}

fn income(amount: Decimal, on: NaiveDate) -> MoneyEntry {
    MoneyEntry::new(amount, EntryKind::Income, on).unwrap()
}

#[test]
fn test_daily_series_has_point_per_day() {
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
    let entries = vec![expense(dec!(5), date(2024, 1, 3)), expense(dec!(7), date(2024, 1, 3))];

    let series = TrendEngine::series_from_entries(
        &entries,
        &range,
        Granularity::Day,
        SeriesMetric::Expense,
    );

    assert_eq!(series.len(), 10);
    assert_eq!(series.points()[0].date, date(2024, 1, 1));
    assert_eq!(series.points()[9].date, date(2024, 1, 10));
    assert_eq!(series.points()[2].value, dec!(12));
    assert_eq!(series.values().iter().filter(|v| v.is_zero()).count(), 9);
}

#[test]
fn test_monthly_series_uses_first_day_of_month() {
    let range = DateRange::new(date(2023, 11, 15), date(2024, 2, 3)).unwrap();
    let entries = vec![
        income(dec!(100), date(2023, 12, 20)),
        expense(dec!(40), date(2023, 12, 21)),
    ];

    let series = TrendEngine::series_from_entries(
        &entries,
        &range,
        Granularity::Month,
        SeriesMetric::Balance,
    );

    let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![date(2023, 11, 1), date(2023, 12, 1), date(2024, 1, 1), date(2024, 2, 1)]
    );
    assert_eq!(series.values(), vec![dec!(0), dec!(60), dec!(0), dec!(0)]);
}

#[test]
fn test_series_ignores_entries_outside_range() {
    let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 2)).unwrap();
    let buckets = Aggregator::aggregate(
        &[expense(dec!(9), date(2024, 2, 29)), expense(dec!(1), date(2024, 3, 2))],
        Granularity::Day,
        None,
    );

    let series = TrendEngine::build_series(&buckets, &range, Granularity::Day, SeriesMetric::Expense);

    assert_eq!(series.values(), vec![dec!(0), dec!(1)]);
}

#[test]
fn test_growth_rate_split_half() {
    let values = [dec!(10), dec!(10), dec!(20), dec!(20)];
    assert_eq!(growth_rate(&values), Some(dec!(100)));

    // Odd length puts the extra point in the second half
    let values = [dec!(10), dec!(20), dec!(40)];
    assert_eq!(growth_rate(&values), Some(dec!(200)));
}

#[test]
fn test_growth_rate_undefined_cases() {
    assert_eq!(growth_rate(&[]), None);
    assert_eq!(growth_rate(&[dec!(5)]), None);
    assert_eq!(growth_rate(&[dec!(0), dec!(0), dec!(3), dec!(4)]), None);
}

#[test]
fn test_stats_of_empty_series() {
    let stats = SeriesStats::of(&[]);
    assert_eq!(stats, SeriesStats::default());
    assert_eq!(average(&[]), Decimal::ZERO);
}

#[test]
fn test_stats_extrema_and_average() {
    let stats = SeriesStats::of(&[dec!(-2), dec!(2), dec!(10), dec!(0)]);
    assert_eq!(stats.average, dec!(2.5));
    assert_eq!(stats.max, dec!(10));
    assert_eq!(stats.min, dec!(-2));
    // first half averages to zero
    assert_eq!(stats.growth_rate, None);
}

#[test]
fn test_growth_relative_to_negative_first_half() {
    // -10 -> -5 over a negative base reads as -50
    assert_eq!(growth_rate(&[dec!(-10), dec!(-10), dec!(-5), dec!(-5)]), Some(dec!(-50)));
}

#[test]
fn test_stats_serialize_two_places() {
    let stats = SeriesStats::of(&[dec!(1), dec!(2)]);
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["average"], "1.50");
    assert_eq!(json["growth_rate"], "100.00");
}

#[test]
fn test_compare_reports_change_per_metric() {
    let baseline = vec![income(dec!(200), date(2024, 1, 5)), expense(dec!(100), date(2024, 1, 6))];
    let current = vec![income(dec!(150), date(2024, 2, 5)), expense(dec!(125), date(2024, 2, 6))];

    let comparison = TrendEngine::compare(&baseline, &current);

    assert_eq!(comparison.income_change, Some(dec!(-25)));
    assert_eq!(comparison.expense_change, Some(dec!(25)));
}

#[test]
fn test_compare_zero_baseline_is_undefined() {
    let comparison = PeriodComparison::between(
        &Totals::default(),
        &Totals {
            income: dec!(10),
            expense: dec!(10),
            count: 2,
        },
    );
    assert_eq!(comparison, PeriodComparison::default());

    let json = serde_json::to_value(comparison).unwrap();
    assert!(json["income_change"].is_null());
}

#[test]
fn test_category_diff() {
    let food = category(1);
    let travel = category(2);
    let rent = category(3);
    let baseline = vec![
        expense(dec!(10), date(2024, 1, 1)).with_category(food),
        expense(dec!(900), date(2024, 1, 1)).with_category(rent),
        expense(dec!(0), date(2024, 1, 1)).with_category(travel),
    ];
    let current = vec![
        expense(dec!(12), date(2024, 2, 1)).with_category(food),
        expense(dec!(300), date(2024, 2, 1)).with_category(travel),
        expense(dec!(3), date(2024, 2, 1)),
    ];

    let diff = TrendEngine::category_diff(&baseline, &current);

    assert_eq!(diff.new_categories.into_iter().collect::<Vec<_>>(), vec![travel]);
    assert_eq!(diff.vanished_categories.into_iter().collect::<Vec<_>>(), vec![rent]);
}

proptest! {
    /// A daily series always has one point per day of its range.
    #[test]
    fn test_series_length_matches_range(
        start_offset in 0i64..1500,
        span in 0i64..400,
        amounts in prop::collection::vec((0i64..10_000, 0i64..400), 0..30),
    ) {
        let start = date(2022, 1, 1) + Duration::days(start_offset);
        let end = start + Duration::days(span);
        let range = DateRange::new(start, end).unwrap();
        let entries: Vec<_> = amounts
            .into_iter()
            .map(|(cents, offset)| expense(Decimal::new(cents, 2), start + Duration::days(offset)))
            .collect();

        let series = TrendEngine::series_from_entries(&entries, &range, Granularity::Day, SeriesMetric::Expense);

        prop_assert_eq!(i64::try_from(series.len()).unwrap(), range.days());
        prop_assert!(series.points().windows(2).all(|w| w[0].date < w[1].date));

        let in_range: Decimal = entries
            .iter()
            .filter(|e| range.contains(e.occurred_on))
            .map(|e| e.amount)
            .sum();
        prop_assert_eq!(series.values().iter().copied().sum::<Decimal>(), in_range);
    }
}

//! Calendar arithmetic: inclusive date ranges, month boundaries, bucket keys.
//!
//! Every month-length, leap-year and year-rollover rule used by the engine
//! lives in this file.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Returns the first day of `year`-`month`, or `None` for an invalid month.
#[must_use]
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the last day of `year`-`month`.
///
/// Computed as day 1 of the following month minus one day, so December rolls
/// into January of the next year and February follows the leap-year rule.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_day_of_month(year, month)?;
    let (next_year, next_month) = shift_month(year, month, 1);
    first_day_of_month(next_year, next_month)?.pred_opt()
}

/// Moves `(year, month)` by `offset` months, wrapping across year boundaries.
///
/// `month` must be within 1..=12.
#[must_use]
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let index = year * 12 + month.cast_signed() - 1 + offset;
    (index.div_euclid(12), index.rem_euclid(12).cast_unsigned() + 1)
}

/// An inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PeriodError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidRange` when the bounds are reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The `days` days ending on `end`, inclusive (`days` of 0 is treated as 1).
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutOfRange` if the start would precede chrono's minimum date.
    pub fn ending_on(end: NaiveDate, days: u32) -> Result<Self, PeriodError> {
        let back = i64::from(days.max(1) - 1);
        let start = end
            .checked_sub_signed(Duration::days(back))
            .ok_or(PeriodError::DateOutOfRange(end))?;
        Ok(Self { start, end })
    }

    /// The full calendar month `year`-`month`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriodSpec` for a month outside 1..=12.
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodError> {
        let start = first_day_of_month(year, month).ok_or_else(|| {
            PeriodError::InvalidPeriodSpec(format!("month {month} of {year} does not exist"))
        })?;
        let end = last_day_of_month(year, month).ok_or(PeriodError::DateOutOfRange(start))?;
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutOfRange` at the edge of chrono's range.
    pub fn month_of(date: NaiveDate) -> Result<Self, PeriodError> {
        Self::month(date.year(), date.month()).map_err(|_| PeriodError::DateOutOfRange(date))
    }

    /// January 1 through December 31 of `year`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutOfRange` for a year chrono cannot represent.
    pub fn year(year: i32) -> Result<Self, PeriodError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or(PeriodError::DateOutOfRange(NaiveDate::MIN))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(PeriodError::DateOutOfRange(start))?;
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Rejects ranges longer than `max_days`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::RangeTooLong`.
    pub fn ensure_at_most(&self, max_days: u32) -> Result<(), PeriodError> {
        let days = self.days();
        if days > i64::from(max_days) {
            return Err(PeriodError::RangeTooLong {
                days,
                max: max_days,
            });
        }
        Ok(())
    }

    /// Every bucket key intersecting the range, in chronological order.
    #[must_use]
    pub fn units(&self, granularity: Granularity) -> Vec<BucketKey> {
        let mut keys = Vec::new();
        let mut key = BucketKey::for_date(self.start, granularity);
        loop {
            keys.push(key);
            match key.next() {
                Some(next) if next.start_date().is_some_and(|d| d <= self.end) => key = next,
                _ => break,
            }
        }
        keys
    }
}

/// Time unit used to bucket entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One calendar day.
    Day,
    /// One calendar month.
    Month,
    /// One calendar year.
    Year,
}

/// Grouping key for one bucket. Ordering is chronological within a granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKey {
    /// A calendar day.
    Day(NaiveDate),
    /// A calendar month.
    Month {
        /// Year.
        year: i32,
        /// Month, 1..=12.
        month: u32,
    },
    /// A calendar year.
    Year(i32),
}

impl BucketKey {
    /// Truncates `date` to the given granularity.
    #[must_use]
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Day => Self::Day(date),
            Granularity::Month => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Year => Self::Year(date.year()),
        }
    }

    /// First calendar day of the bucket.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        match *self {
            Self::Day(date) => Some(date),
            Self::Month { year, month } => first_day_of_month(year, month),
            Self::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }

    /// The bucket immediately after this one.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        match *self {
            Self::Day(date) => date.succ_opt().map(Self::Day),
            Self::Month { year, month } => {
                let (year, month) = shift_month(year, month, 1);
                first_day_of_month(year, month).map(|_| Self::Month { year, month })
            }
            Self::Year(year) => NaiveDate::from_ymd_opt(year + 1, 1, 1).map(|_| Self::Year(year + 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(2023, 1, 31)]
    #[case(2023, 2, 28)]
    #[case(2024, 2, 29)]
    #[case(2023, 3, 31)]
    #[case(2023, 4, 30)]
    #[case(2023, 5, 31)]
    #[case(2023, 6, 30)]
    #[case(2023, 7, 31)]
    #[case(2023, 8, 31)]
    #[case(2023, 9, 30)]
    #[case(2023, 10, 31)]
    #[case(2023, 11, 30)]
    #[case(2023, 12, 31)]
    #[case(1900, 2, 28)]
    #[case(2000, 2, 29)]
    fn test_last_day_of_month(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        assert_eq!(last_day_of_month(year, month), Some(date(year, month, day)));
    }

    #[test]
    fn test_last_day_rejects_invalid_month() {
        assert_eq!(last_day_of_month(2024, 0), None);
        assert_eq!(last_day_of_month(2024, 13), None);
    }

    #[rstest]
    #[case(2024, 3, -5, 2023, 10)]
    #[case(2024, 1, -1, 2023, 12)]
    #[case(2024, 12, 1, 2025, 1)]
    #[case(2024, 6, 0, 2024, 6)]
    #[case(2024, 6, -18, 2022, 12)]
    fn test_shift_month_wraps_years(
        #[case] year: i32,
        #[case] month: u32,
        #[case] offset: i32,
        #[case] want_year: i32,
        #[case] want_month: u32,
    ) {
        assert_eq!(shift_month(year, month, offset), (want_year, want_month));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = DateRange::new(date(2024, 1, 10), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidRange { .. }));
    }

    #[test]
    fn test_range_days_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        assert_eq!(range.days(), 10);
        assert_eq!(DateRange::single_day(date(2024, 1, 1)).days(), 1);
        assert_eq!(DateRange::year(2024).unwrap().days(), 366);
    }

    #[test]
    fn test_ending_on() {
        let range = DateRange::ending_on(date(2024, 3, 2), 7).unwrap();
        assert_eq!(range.start(), date(2024, 2, 25));
        assert_eq!(range.days(), 7);
    }

    #[test]
    fn test_ensure_at_most() {
        let range = DateRange::year(2024).unwrap();
        assert!(range.ensure_at_most(366).is_ok());
        assert!(matches!(
            range.ensure_at_most(365),
            Err(PeriodError::RangeTooLong { days: 366, max: 365 })
        ));
    }

    #[test]
    fn test_month_units_cover_partial_months() {
        let range = DateRange::new(date(2023, 11, 15), date(2024, 2, 1)).unwrap();
        let units = range.units(Granularity::Month);
        assert_eq!(
            units,
            vec![
                BucketKey::Month { year: 2023, month: 11 },
                BucketKey::Month { year: 2023, month: 12 },
                BucketKey::Month { year: 2024, month: 1 },
                BucketKey::Month { year: 2024, month: 2 },
            ]
        );
    }

    #[test]
    fn test_year_units() {
        let range = DateRange::new(date(2022, 6, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(
            range.units(Granularity::Year),
            vec![BucketKey::Year(2022), BucketKey::Year(2023), BucketKey::Year(2024)]
        );
    }

    #[test]
    fn test_range_deserialize_validates() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-01","end":"2024-01-31"}"#).unwrap();
        assert_eq!(ok.days(), 31);
        let bad = serde_json::from_str::<DateRange>(r#"{"start":"2024-02-01","end":"2024-01-31"}"#);
        assert!(bad.is_err());
    }

    proptest! {
        /// Daily units match the inclusive day count with no gaps or duplicates.
        #[test]
        fn test_daily_units_match_day_count(offset in 0i64..3000, len in 0i64..400) {
            let start = date(2018, 1, 1) + Duration::days(offset);
            let end = start + Duration::days(len);
            let range = DateRange::new(start, end).unwrap();
            let units = range.units(Granularity::Day);

            prop_assert_eq!(units.len() as i64, range.days());
            prop_assert!(units.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(units.first().copied(), Some(BucketKey::Day(start)));
            prop_assert_eq!(units.last().copied(), Some(BucketKey::Day(end)));
        }
    }
}

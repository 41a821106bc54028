//! Pure folds from entry sequences to buckets, totals and category shares.
//!
//! Every function here is a fold with call-local state: the result depends
//! only on the multiset of input entries, never on their order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_shared::types::{CategoryId, percent_of};

use super::types::{AggregateBucket, BucketMap, CategoryBreakdown, CategoryShare, Totals};
use crate::ledger::{EntryKind, MoneyEntry};
use crate::period::{BucketKey, DateRange, Granularity};

/// Groups and sums ledger entries.
pub struct Aggregator;

impl Aggregator {
    /// Buckets `entries` by `occurred_on` truncated to `granularity`.
    ///
    /// Only buckets with at least one entry are emitted. When `range` is
    /// given, entries outside it are dropped before folding.
    #[must_use]
    pub fn aggregate(
        entries: &[MoneyEntry],
        granularity: Granularity,
        range: Option<&DateRange>,
    ) -> BucketMap {
        entries
            .iter()
            .filter(|e| range.is_none_or(|r| r.contains(e.occurred_on)))
            .fold(BTreeMap::new(), |mut buckets, entry| {
                let key = BucketKey::for_date(entry.occurred_on, granularity);
                buckets
                    .entry(key)
                    .or_insert_with(|| AggregateBucket::empty(key))
                    .add(entry);
                buckets
            })
    }

    /// Income, expense and count over all `entries`.
    #[must_use]
    pub fn totals(entries: &[MoneyEntry]) -> Totals {
        entries.iter().fold(Totals::default(), |mut totals, entry| {
            match entry.kind {
                EntryKind::Income => totals.income += entry.amount,
                EntryKind::Expense => totals.expense += entry.amount,
            }
            totals.count += 1;
            totals
        })
    }

    /// Sum of `kind` amounts, optionally restricted to one category.
    #[must_use]
    pub fn sum_of(entries: &[MoneyEntry], kind: EntryKind, category: Option<CategoryId>) -> Decimal {
        entries
            .iter()
            .filter(|e| e.kind == kind)
            .filter(|e| category.is_none_or(|id| e.category_id == Some(id)))
            .map(|e| e.amount)
            .sum()
    }

    /// Per-category totals and entry counts, restricted to `kind` when given.
    #[must_use]
    pub fn category_totals(
        entries: &[MoneyEntry],
        kind: Option<EntryKind>,
    ) -> BTreeMap<Option<CategoryId>, (Decimal, u64)> {
        entries
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .fold(BTreeMap::new(), |mut totals, entry| {
                let slot = totals.entry(entry.category_id).or_insert((Decimal::ZERO, 0));
                slot.0 += entry.amount;
                slot.1 += 1;
                totals
            })
    }

    /// Category shares of the `kind` total (both kinds when `None`).
    ///
    /// Sorted by total descending; ties break on ascending category id with
    /// uncategorized entries first.
    #[must_use]
    pub fn by_category(entries: &[MoneyEntry], kind: Option<EntryKind>) -> CategoryBreakdown {
        let totals = Self::category_totals(entries, kind);
        let grand_total: Decimal = totals.values().map(|(total, _)| *total).sum();

        let mut shares: Vec<CategoryShare> = totals
            .into_iter()
            .map(|(category_id, (total, count))| CategoryShare {
                category_id,
                total,
                percentage: percent_of(total, grand_total).unwrap_or(Decimal::ZERO),
                count,
            })
            .collect();

        shares.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });

        CategoryBreakdown {
            total: grand_total,
            shares,
        }
    }
}

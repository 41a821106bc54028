//! Aggregation data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, round2};

use crate::ledger::{EntryKind, MoneyEntry};
use crate::period::BucketKey;

/// Buckets keyed chronologically.
pub type BucketMap = BTreeMap<BucketKey, AggregateBucket>;

/// Income and expense sums for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBucket {
    /// Bucket key.
    pub key: BucketKey,
    /// Sum of income amounts.
    #[serde(serialize_with = "round2")]
    pub income: Decimal,
    /// Sum of expense amounts.
    #[serde(serialize_with = "round2")]
    pub expense: Decimal,
    /// Number of entries of either kind.
    pub count: u64,
}

impl AggregateBucket {
    /// A bucket with no entries.
    #[must_use]
    pub const fn empty(key: BucketKey) -> Self {
        Self {
            key,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            count: 0,
        }
    }

    /// Folds one entry into the bucket.
    pub fn add(&mut self, entry: &MoneyEntry) {
        match entry.kind {
            EntryKind::Income => self.income += entry.amount,
            EntryKind::Expense => self.expense += entry.amount,
        }
        self.count += 1;
    }

    /// Income minus expense.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }

    /// Looks up `key` in `buckets`, yielding an empty bucket when absent.
    #[must_use]
    pub fn get_or_zero(buckets: &BucketMap, key: BucketKey) -> Self {
        buckets.get(&key).copied().unwrap_or_else(|| Self::empty(key))
    }
}

/// Totals over an entry set, without bucketing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of income amounts.
    #[serde(serialize_with = "round2")]
    pub income: Decimal,
    /// Sum of expense amounts.
    #[serde(serialize_with = "round2")]
    pub expense: Decimal,
    /// Number of entries.
    pub count: u64,
}

impl Totals {
    /// Income minus expense.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// One category's share of a grouping.
///
/// `percentage` is 0 for every share when the grouping total is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category, or `None` for uncategorized entries.
    pub category_id: Option<CategoryId>,
    /// Sum of amounts in this category.
    #[serde(rename = "total_amount", serialize_with = "round2")]
    pub total: Decimal,
    /// Share of the grouping total, 0..=100.
    #[serde(serialize_with = "round2")]
    pub percentage: Decimal,
    /// Number of entries.
    pub count: u64,
}

/// Category shares of one grouping, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Grouping total.
    #[serde(rename = "total_amount", serialize_with = "round2")]
    pub total: Decimal,
    /// Shares sorted by total descending, then category id ascending.
    pub shares: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    /// Category ids with a nonzero total.
    pub fn active_categories(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.shares
            .iter()
            .filter(|s| !s.total.is_zero())
            .filter_map(|s| s.category_id)
    }
}

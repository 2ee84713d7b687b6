//! Aggregation passes over a classified transaction set.
//!
//! Every function here is pure: it takes the full slice and builds a fresh
//! result. Unclassified transactions count under the "No category" sentinel,
//! and rows with unparseable dates drop out of the date-bucketed passes only.

use piggy_core::{Bucket, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Number of entries kept in every "top categories" list
pub const TOP_N: usize = 3;

/// Insertion-ordered accumulator keyed by string. Keeps first-encountered
/// order so stable sorts break ties the same way every run.
#[derive(Debug, Clone)]
pub(crate) struct Tally<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Tally<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub(crate) fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Tally::new()
    }
}

impl<V: Default> Tally<V> {
    pub(crate) fn entry(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }
}

/// Totals and counts over the whole set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_income: f64,
    /// Negative
    pub total_expense: f64,
    pub balance: f64,
    pub transaction_count: usize,
    pub income_transactions: usize,
    pub expense_transactions: usize,
}

/// Signed total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub sum: f64,
    pub count: usize,
    /// Share of total expense, 0 when there is no expense at all
    pub percent: f64,
}

/// Income/expense summary for one month or quarter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// "YYYY-MM" or "YYYY-Qn"
    pub key: String,
    pub income: f64,
    /// Negative
    pub expenses: f64,
    /// Most frequent expense categories with their occurrence counts
    pub top_categories: Vec<(String, usize)>,
}

/// Mean monthly spend per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSpending {
    /// Category -> mean monthly expense magnitude, rounded to cents
    pub average_spending: Vec<(String, f64)>,
    pub top_categories: Vec<(String, f64)>,
}

impl HistoricalSpending {
    pub fn average_for(&self, category: &str) -> Option<f64> {
        self.average_spending
            .iter()
            .find(|(cat, _)| cat == category)
            .map(|(_, avg)| *avg)
    }
}

/// Round to 2 decimal places; exact halves go to the even cent
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Income, expense and balance totals. Zero amounts count toward neither side.
pub fn basic_stats(txns: &[Transaction]) -> BasicStats {
    let mut stats = BasicStats {
        transaction_count: txns.len(),
        ..BasicStats::default()
    };

    for t in txns {
        if t.is_income() {
            stats.total_income += t.amount;
            stats.income_transactions += 1;
        } else if t.is_expense() {
            stats.total_expense += t.amount;
            stats.expense_transactions += 1;
        }
    }
    stats.balance = stats.total_income + stats.total_expense;
    stats
}

/// Per-category signed sums, largest magnitude first.
pub fn by_category(txns: &[Transaction]) -> Vec<CategoryStats> {
    let total_expense: f64 = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    let mut totals: Tally<(f64, usize)> = Tally::new();
    for t in txns {
        let (sum, count) = totals.entry(t.category_or_default());
        *sum += t.amount;
        *count += 1;
    }

    let mut stats: Vec<CategoryStats> = totals
        .into_entries()
        .into_iter()
        .map(|(category, (sum, count))| {
            let percent = if total_expense != 0.0 {
                (-sum / -total_expense) * 100.0
            } else {
                0.0
            };
            CategoryStats {
                category,
                sum,
                count,
                percent,
            }
        })
        .collect();

    // sort_by is stable: equal magnitudes keep first-encountered order
    stats.sort_by(|a, b| b.sum.abs().total_cmp(&a.sum.abs()));
    stats
}

/// Monthly summaries ("YYYY-MM"), chronological
pub fn by_month(txns: &[Transaction]) -> Vec<TimeBucket> {
    by_time(txns, Bucket::Month)
}

/// Fiscal quarter summaries ("YYYY-Qn"), chronological
pub fn by_quarter(txns: &[Transaction]) -> Vec<TimeBucket> {
    by_time(txns, Bucket::Quarter)
}

#[derive(Default)]
struct BucketAcc {
    income: f64,
    expenses: f64,
    categories: Tally<usize>,
}

/// Bucket transactions by month or quarter. Zero amounts count as income here.
pub fn by_time(txns: &[Transaction], bucket: Bucket) -> Vec<TimeBucket> {
    let mut buckets: BTreeMap<String, BucketAcc> = BTreeMap::new();
    let mut skipped = 0usize;

    for t in txns {
        let Some(key) = bucket.key_for(&t.date) else {
            skipped += 1;
            continue;
        };
        let acc = buckets.entry(key).or_default();
        if t.amount >= 0.0 {
            acc.income += t.amount;
        } else {
            acc.expenses += t.amount;
            *acc.categories.entry(t.category_or_default()) += 1;
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, ?bucket, "skipped transactions with unparseable dates");
    }

    buckets
        .into_iter()
        .map(|(key, acc)| TimeBucket {
            key,
            income: acc.income,
            expenses: acc.expenses,
            top_categories: most_common(acc.categories, TOP_N),
        })
        .collect()
}

/// Highest counts first; ties keep first-encountered order
fn most_common(counts: Tally<usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries = counts.into_entries();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

/// Mean monthly expense per category, averaged over the months in which the
/// category actually had spending.
pub fn historical_spending(txns: &[Transaction]) -> HistoricalSpending {
    let mut monthly: Tally<BTreeMap<String, f64>> = Tally::new();

    for t in txns.iter().filter(|t| t.is_expense()) {
        let Some(month) = Bucket::Month.key_for(&t.date) else {
            continue;
        };
        *monthly
            .entry(t.category_or_default())
            .entry(month)
            .or_insert(0.0) += t.abs_amount();
    }

    let average_spending: Vec<(String, f64)> = monthly
        .into_entries()
        .into_iter()
        .filter(|(_, months)| !months.is_empty())
        .map(|(cat, months)| {
            let mean = months.values().sum::<f64>() / months.len() as f64;
            (cat, round2(mean))
        })
        .collect();

    let mut top_categories = average_spending.clone();
    top_categories.sort_by(|a, b| b.1.total_cmp(&a.1));
    top_categories.truncate(TOP_N);

    HistoricalSpending {
        average_spending,
        top_categories,
    }
}

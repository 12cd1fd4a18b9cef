use crate::categories::Categories;
use crate::model::{Amount, Expense, Expenses};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The key that `aggregate_by` groups rows on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group on the category. Largest total first.
    #[default]
    Category,
    /// Group on the full date. Earliest first.
    Date,
    /// Group on the `YYYY-MM` month key. Earliest first.
    Month,
}

serde_plain::derive_display_from_serialize!(GroupBy);
serde_plain::derive_fromstr_from_deserialize!(GroupBy);

/// The summed amount of one group of rows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub total: Amount,
}

impl Group {
    pub fn new(key: impl Into<String>, total: Amount) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// The earliest and latest dates in a table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: String,
    pub end: String,
}

/// Sums amounts per group. Category groups are sorted by descending total (ties by name), date and
/// month groups by ascending key.
pub fn aggregate_by(table: &Expenses, key: GroupBy) -> Vec<Group> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for expense in table {
        let group = match key {
            GroupBy::Category => expense.category.as_str(),
            GroupBy::Date => expense.date.as_str(),
            GroupBy::Month => expense.month(),
        };
        *totals.entry(group).or_default() += expense.amount;
    }

    let mut groups: Vec<Group> = totals
        .into_iter()
        .map(|(k, total)| Group::new(k, total))
        .collect();
    if key == GroupBy::Category {
        // Stable, so equal totals stay in name order.
        groups.sort_by(|a, b| b.total.cmp(&a.total));
    }
    groups
}

/// The sum of every amount in the table; zero for an empty table.
pub fn total(table: &Expenses) -> Amount {
    table.iter().map(|e| e.amount).sum()
}

/// The number of rows in the table.
pub fn count(table: &Expenses) -> usize {
    table.len()
}

/// The smallest and largest date strings in the table, ignoring undated rows. `None` means there
/// is no data to span.
pub fn date_range(table: &Expenses) -> Option<DateSpan> {
    let mut dates = table
        .iter()
        .map(|e| e.date.as_str())
        .filter(|d| !d.is_empty());
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateSpan {
        start: start.to_string(),
        end: end.to_string(),
    })
}

/// The distinct month keys present in the table, ascending.
pub fn months(table: &Expenses) -> Vec<String> {
    table
        .iter()
        .filter(|e| !e.date.is_empty())
        .map(|e| e.month().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The configured categories together with every non-blank category used in the table, sorted
/// and deduplicated.
pub fn known_categories(table: &Expenses, configured: &Categories) -> Vec<String> {
    configured
        .iter()
        .cloned()
        .chain(
            table
                .iter()
                .filter(|e| !e.category.trim().is_empty())
                .map(|e| e.category.clone()),
        )
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The last `n` rows of the table, each with its index.
pub fn recent(table: &Expenses, n: usize) -> Vec<(usize, &Expense)> {
    let skip = table.len().saturating_sub(n);
    table.iter().enumerate().skip(skip).collect()
}

/// Per-category totals for the rows whose date starts with `month` (`YYYY-MM`).
pub fn month_totals(table: &Expenses, month: &str) -> BTreeMap<String, Amount> {
    let mut totals: BTreeMap<String, Amount> = BTreeMap::new();
    for expense in table.iter().filter(|e| e.date.starts_with(month)) {
        *totals.entry(expense.category.clone()).or_default() += expense.amount;
    }
    totals
}

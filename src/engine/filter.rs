use crate::model::{Expense, Expenses};
use serde::{Deserialize, Serialize};

/// The category and month value that means "no filter".
pub const ALL: &str = "All";

/// A set of row predicates. Every predicate that is set must match; an unset (or blank)
/// predicate matches everything.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Filter {
    /// Keep rows with this category, compared case-insensitively. `All` disables the filter.
    pub category: Option<String>,
    /// Keep rows dated on or after this `YYYY-MM-DD` date.
    pub start: Option<String>,
    /// Keep rows dated on or before this `YYYY-MM-DD` date.
    pub end: Option<String>,
    /// Keep rows whose text contains this, compared case-insensitively.
    pub keyword: Option<String>,
    /// Keep rows in this `YYYY-MM` month. `All` disables the filter.
    pub month: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        active(&self.category).is_none()
            && set(&self.start).is_none()
            && set(&self.end).is_none()
            && set(&self.keyword).is_none()
            && active(&self.month).is_none()
    }

    /// Returns true if `expense` satisfies every active predicate.
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = active(&self.category) {
            if expense.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }

        let start = set(&self.start);
        let end = set(&self.end);
        if (start.is_some() || end.is_some()) && expense.date.is_empty() {
            // An undated row cannot be placed in a date range.
            return false;
        }
        if let Some(start) = start {
            if expense.date.as_str() < start {
                return false;
            }
        }
        if let Some(end) = end {
            if expense.date.as_str() > end {
                return false;
            }
        }

        if let Some(month) = active(&self.month) {
            if expense.month() != month {
                return false;
            }
        }

        if let Some(keyword) = set(&self.keyword) {
            if !expense
                .search_text()
                .to_lowercase()
                .contains(&keyword.to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

/// Returns the rows of `table` that match `filter`, in table order.
pub fn filter(table: &Expenses, filter: &Filter) -> Expenses {
    table
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}

/// Like `filter`, but yields each matching row with its index in `table`, which is the index that
/// `update` and `delete` expect.
pub fn filter_indexed<'a>(
    table: &'a Expenses,
    filter: &'a Filter,
) -> impl Iterator<Item = (usize, &'a Expense)> + 'a {
    table
        .iter()
        .enumerate()
        .filter(move |(_, e)| filter.matches(e))
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn active(value: &Option<String>) -> Option<&str> {
    set(value).filter(|s| *s != ALL)
}

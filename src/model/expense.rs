use crate::error::Error;
use crate::model::name::title_case;
use crate::model::Amount;
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// The format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Descriptions longer than this are shortened for display.
const LABEL_DESCRIPTION_MAX: usize = 40;

/// The rows of the record file in storage order. A row's identity is its position in this table.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expenses {
    data: Vec<Expense>,
}

impl Expenses {
    pub fn new(data: Vec<Expense>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[Expense] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<Expense> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.data.iter()
    }

    pub(crate) fn push(&mut self, expense: Expense) {
        self.data.push(expense)
    }

    /// Replaces the row at `index`, returning the previous row.
    pub(crate) fn replace(&mut self, index: usize, expense: Expense) -> Result<Expense> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;
        Ok(std::mem::replace(slot, expense))
    }

    /// Removes the row at `index`. Rows after it shift down by one.
    pub(crate) fn remove(&mut self, index: usize) -> Result<Expense> {
        if index >= self.len() {
            return Err(out_of_range(index, self.len()));
        }
        Ok(self.data.remove(index))
    }
}

fn out_of_range(index: usize, len: usize) -> Error {
    Error::not_found(format!(
        "There is no expense at index {index}, the table has {len} row{}",
        if len == 1 { "" } else { "s" }
    ))
}

impl Index<usize> for Expenses {
    type Output = Expense;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl FromIterator<Expense> for Expenses {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Expenses {
    type Item = Expense;
    type IntoIter = std::vec::IntoIter<Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a Expenses {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Represents a single row of the record file.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    /// An ISO-8601 date, `YYYY-MM-DD`. Rows loaded from disk may hold anything here, including an
    /// empty string.
    pub date: String,
    pub amount: Amount,
    pub category: String,
    pub description: String,
}

impl Expense {
    pub fn new(
        date: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Checks a record that is about to be written by an append or update.
    ///
    /// # Errors
    /// - `Validation` if the date is blank or not a `YYYY-MM-DD` calendar date.
    /// - `Validation` if the amount is negative.
    /// - `Validation` if the category is blank.
    pub fn validate(&self) -> Result<()> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(Error::validation("The date cannot be blank"));
        }
        parse_date(date)?;
        if self.amount.is_negative() {
            return Err(Error::validation(format!(
                "The amount cannot be negative, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::validation("The category cannot be blank"));
        }
        Ok(())
    }

    /// The form a new or edited record is stored in: trimmed date and description, and a trimmed,
    /// title-cased category.
    pub fn normalized(self) -> Self {
        Self {
            date: self.date.trim().to_string(),
            amount: self.amount,
            category: title_case(self.category.trim()),
            description: self.description.trim().to_string(),
        }
    }

    /// The month key of this row, i.e. the first seven characters of the date (`YYYY-MM`).
    pub fn month(&self) -> &str {
        match self.date.char_indices().nth(7) {
            Some((ix, _)) => &self.date[..ix],
            None => &self.date,
        }
    }

    /// The text that a keyword search scans: every field joined by spaces.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.date,
            self.amount.search_text(),
            self.category,
            self.description
        )
    }

    /// A one line label for lists, e.g. `[12] 2025-01-01 | $10.00 | Food | Short description...`
    pub fn label(&self, index: usize) -> String {
        format!(
            "[{index}] {} | {} | {} | {}",
            self.date,
            self.amount.to_currency(),
            self.category,
            truncate(&self.description, LABEL_DESCRIPTION_MAX)
        )
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    // Dates are compared as strings, so the zero padding is required.
    if trimmed.len() != 10 {
        return Err(Error::validation(format!(
            "Invalid date '{s}', expected YYYY-MM-DD"
        )));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        Error::validation(format!("Invalid date '{s}', expected YYYY-MM-DD: {e}"))
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut short: String = s.chars().take(max - 3).collect();
    short.push_str("...");
    short
}

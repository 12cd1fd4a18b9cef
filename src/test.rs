//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, Expense, Expenses};
use crate::Config;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a spendlog home directory with Config and data files.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized home directory and an empty expenses file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("spendlog");
        let config = Config::create(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Creates a test environment with the rows of `sample_expenses` already stored.
    pub fn with_sample_expenses() -> Self {
        let env = Self::new();
        env.config
            .records()
            .save(&Expenses::new(sample_expenses()))
            .unwrap();
        env
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Appends an expense through the record store and returns its index.
    pub fn insert_expense(
        &self,
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> usize {
        self.config
            .records()
            .append(expense(date, amount, category, description))
            .unwrap()
    }

    /// Loads the stored expenses.
    pub fn expenses(&self) -> Expenses {
        self.config.records().load().unwrap()
    }
}

/// Builds an expense from string parts. Panics if `amount` does not parse.
pub fn expense(date: &str, amount: &str, category: &str, description: &str) -> Expense {
    Expense::new(date, Amount::from_str(amount).unwrap(), category, description)
}

/// Five rows over two months and three categories. The total is 52.00.
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        expense("2025-01-15", "10.00", "Food", "Lunch at cafe"),
        expense("2025-01-15", "5.25", "Transport", "Bus fare"),
        expense("2025-02-03", "30.00", "Bills", "Phone bill"),
        expense("2025-01-20", "2.75", "Food", "Snacks"),
        expense("2025-02-28", "4.00", "Transport", "Train ticket"),
    ]
}

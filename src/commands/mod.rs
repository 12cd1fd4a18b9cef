//! Command handlers for the spendlog CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod category;
mod dashboard;
mod delete;
mod edit;
mod export;
mod init;
mod list;
mod summary;

use crate::model::Expense;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::add;
pub use category::{add_category, list_categories, remove_category};
pub use dashboard::{dashboard, Dashboard};
pub use delete::{delete, undo};
pub use edit::edit;
pub use export::export;
pub use init::init;
pub use list::list;
pub use summary::summary;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// An expense together with its index in the record file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Row {
    pub index: usize,
    #[serde(flatten)]
    pub expense: Expense,
}

impl Row {
    pub fn new(index: usize, expense: Expense) -> Self {
        Self { index, expense }
    }

    /// See `Expense::label`.
    pub fn label(&self) -> String {
        self.expense.label(self.index)
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

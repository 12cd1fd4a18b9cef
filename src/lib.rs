//! spendlog keeps personal expenses in a local CSV file and answers questions about them.
//!
//! The record file is owned by `store::RecordStore` and the category list by
//! `categories::CategoryStore`. The `engine` module filters and summarizes a loaded table without
//! doing any I/O, and `commands` ties these together for the CLI.

pub mod args;
pub mod categories;
pub mod commands;
mod config;
pub mod engine;
mod error;
pub mod model;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};

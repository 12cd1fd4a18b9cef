//! The record store: reads and writes the expenses CSV file.
//!
//! The whole file is read into memory, changed, and written back on every mutation. Each mutation
//! reloads the file first so that it never acts on a stale table. Writes go to a temporary file
//! which is then renamed over the record file.

use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Column, Expense, Expenses};
use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Owns the expenses CSV file and the directory that exports are written to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RecordStore {
    path: PathBuf,
    reports: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, reports: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reports: reports.into(),
        }
    }

    /// The path to the expenses CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory that exports are written to.
    pub fn reports(&self) -> &Path {
        &self.reports
    }

    /// Creates the storage and reports directories if they are missing, and writes a header-only
    /// table if the record file is missing or empty. Safe to call repeatedly.
    pub fn ensure_storage(&self) -> Result<()> {
        self.make_parent().pub_result(ErrorType::Io)?;
        utils::make_dir(&self.reports).pub_result(ErrorType::Io)?;
        if utils::is_missing_or_empty(&self.path) {
            debug!("Initializing an empty expenses file at {}", self.path.display());
            self.save(&Expenses::default())?;
        }
        Ok(())
    }

    /// Reads the whole table. A missing, empty or header-only file is an empty table. Cells that
    /// are missing or malformed are repaired rather than rejected.
    ///
    /// # Errors
    /// - `Io` if the file exists but cannot be read or is not valid CSV.
    pub fn load(&self) -> Result<Expenses> {
        let content = match utils::read_if_exists(&self.path).pub_result(ErrorType::Io)? {
            Some(content) => content,
            None => {
                debug!("No expenses file at {}", self.path.display());
                return Ok(Expenses::default());
            }
        };
        let table = decode(&content)
            .with_context(|| format!("Unable to parse the expenses file {}", self.path.display()))
            .pub_result(ErrorType::Io)?;
        debug!("Loaded {} expenses from {}", table.len(), self.path.display());
        Ok(table)
    }

    /// Writes the whole table, replacing the file.
    pub fn save(&self, table: &Expenses) -> Result<()> {
        let data = self.export(table)?;
        self.make_parent().pub_result(ErrorType::Io)?;
        utils::write_atomic(&self.path, data)
            .context("Unable to save the expenses file")
            .pub_result(ErrorType::Io)?;
        debug!("Saved {} expenses to {}", table.len(), self.path.display());
        Ok(())
    }

    /// Serializes `table` exactly as `save` would write it.
    pub fn export(&self, table: &Expenses) -> Result<Vec<u8>> {
        encode(table).pub_result(ErrorType::Io)
    }

    /// Validates and normalizes `expense`, then adds it to the end of the table.
    ///
    /// Returns the zero-based index of the new row.
    pub fn append(&self, expense: Expense) -> Result<usize> {
        expense.validate()?;
        let expense = expense.normalized();
        let mut table = self.load()?;
        table.push(expense);
        self.save(&table)?;
        Ok(table.len() - 1)
    }

    /// Validates and normalizes `expense`, then replaces the row at `index` with it.
    ///
    /// Returns the row that was replaced.
    ///
    /// # Errors
    /// - `Validation` if `expense` is rejected.
    /// - `NotFound` if there is no row at `index`. Nothing is written.
    pub fn update(&self, index: usize, expense: Expense) -> Result<Expense> {
        expense.validate()?;
        let expense = expense.normalized();
        let mut table = self.load()?;
        let previous = table.replace(index, expense)?;
        self.save(&table)?;
        Ok(previous)
    }

    /// Removes the row at `index`. The rows after it move up by one position.
    ///
    /// Returns the removed row.
    ///
    /// # Errors
    /// - `NotFound` if there is no row at `index`. Nothing is written.
    pub fn delete(&self, index: usize) -> Result<Expense> {
        let mut table = self.load()?;
        let removed = table.remove(index)?;
        self.save(&table)?;
        Ok(removed)
    }

    /// Removes the last row. When the table is empty this does nothing and returns `None`.
    pub fn delete_last(&self) -> Result<Option<Expense>> {
        let table = self.load()?;
        if table.is_empty() {
            info!("There are no expenses to delete");
            return Ok(None);
        }
        self.delete(table.len() - 1).map(Some)
    }

    fn make_parent(&self) -> anyhow::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => utils::make_dir(parent),
            _ => Ok(()),
        }
    }
}

/// Parses the record file. Columns are found by header name, so their order in the file does not
/// matter. Unknown columns are dropped and absent ones are filled with empty values.
fn decode(content: &str) -> anyhow::Result<Expenses> {
    if content.trim().is_empty() {
        return Ok(Expenses::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("Unable to read the header row")?.clone();
    let mut positions: [Option<usize>; 4] = [None; 4];
    for (ix, header) in headers.iter().enumerate() {
        match Column::from_header(header) {
            Ok(column) => {
                let slot = &mut positions[column.index()];
                if slot.is_none() {
                    *slot = Some(ix);
                }
            }
            Err(_) => debug!("Dropping unknown column '{header}'"),
        }
    }

    let mut data = Vec::new();
    for (row_ix, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Unable to read row {} of the file", row_ix + 2))?;
        let cell = |column: Column| {
            positions[column.index()]
                .and_then(|ix| record.get(ix))
                .unwrap_or_default()
        };
        data.push(Expense {
            date: cell(Column::Date).to_string(),
            amount: Amount::parse_lenient(cell(Column::Amount)),
            category: cell(Column::Category).to_string(),
            description: cell(Column::Description).to_string(),
        });
    }
    Ok(Expenses::new(data))
}

/// Writes the canonical header and one line per row, amounts with two decimals.
fn encode(table: &Expenses) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(Column::ALL.iter().map(|c| c.as_header_str()))
        .context("Unable to write the header row")?;
    for expense in table {
        let amount = expense.amount.to_string();
        writer
            .write_record([
                expense.date.as_str(),
                amount.as_str(),
                expense.category.as_str(),
                expense.description.as_str(),
            ])
            .context("Unable to write an expense row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV data: {}", e.error()))
}

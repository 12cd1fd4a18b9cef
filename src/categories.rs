//! The category store: a JSON list of category names.
//!
//! The list is normalized (trimmed, title-cased, deduplicated, sorted) every time it is read or
//! written, so a hand-edited file is repaired on the next save.

use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{canonical_name, normalize_names};
use crate::{utils, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The categories written when the file does not exist yet.
pub const DEFAULT_CATEGORIES: [&str; 6] =
    ["Food", "Transport", "Bills", "Groceries", "Health", "Other"];

/// A normalized, sorted list of unique category names.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Normalizes `names` into a `Categories` list.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(normalize_names(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Categories {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Owns the categories JSON file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CategoryStore {
    path: PathBuf,
}

impl CategoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `DEFAULT_CATEGORIES` if the file does not exist. An existing file is left alone.
    pub fn ensure(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        debug!(
            "Initializing default categories at {}",
            self.path.display()
        );
        self.write(&Categories::new(DEFAULT_CATEGORIES))
    }

    /// Reads the category list. If the file does not exist it is created with
    /// `DEFAULT_CATEGORIES` first.
    ///
    /// # Errors
    /// - `Io` if the file cannot be read or written, or is not a JSON array of strings.
    pub fn load(&self) -> Result<Categories> {
        self.ensure()?;
        let raw: Vec<String> = utils::deserialize(&self.path).pub_result(ErrorType::Io)?;
        Ok(Categories::new(raw))
    }

    /// Normalizes `names` and replaces the file with them.
    pub fn save<I, S>(&self, names: I) -> Result<Categories>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories = Categories::new(names);
        self.write(&categories)?;
        Ok(categories)
    }

    /// Adds `name` to the list. Returns the name as it is stored, e.g. `"Eating Out"` for
    /// `" eating out "`. Adding a name that already exists is not an error.
    ///
    /// # Errors
    /// - `Validation` if `name` is blank.
    pub fn add(&self, name: &str) -> Result<String> {
        let canonical = canonical_name(name)
            .ok_or_else(|| Error::validation("The category name cannot be blank"))?;
        let current = self.load()?;
        let names = current.iter().map(String::as_str).chain([canonical.as_str()]);
        self.save(names)?;
        Ok(canonical)
    }

    /// Removes every entry exactly equal to `name`. The comparison is case-sensitive against the
    /// stored (title-cased) names. Returns `false` if nothing matched, which is not an error.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let current = self.load()?;
        let remaining: Vec<&String> = current.iter().filter(|n| n.as_str() != name).collect();
        let removed = remaining.len() != current.len();
        self.save(remaining)?;
        Ok(removed)
    }

    fn write(&self, categories: &Categories) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                utils::make_dir(parent).pub_result(ErrorType::Io)?;
            }
        }
        let json = serde_json::to_string_pretty(categories)
            .context("Unable to serialize categories")
            .pub_result(ErrorType::Io)?;
        utils::write_atomic(&self.path, json)
            .context("Unable to save the categories file")
            .pub_result(ErrorType::Io)
    }
}

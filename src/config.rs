//! Configuration file handling for spendlog.
//!
//! The configuration file is stored at `$SPENDLOG_HOME/config.json` and contains the monthly
//! budgets per category and, optionally, the locations of the expenses and categories files.

use crate::categories::CategoryStore;
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::Amount;
use crate::store::RecordStore;
use crate::{utils, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "spendlog";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";
const REPORTS: &str = "reports";
const EXPENSES_CSV: &str = "expenses.csv";
const CATEGORIES_JSON: &str = "categories.json";

/// The monthly budgets written to a new configuration file.
const DEFAULT_BUDGETS: [(&str, i64); 6] = [
    ("Food", 300),
    ("Transport", 150),
    ("Bills", 400),
    ("Groceries", 250),
    ("Health", 150),
    ("Other", 100),
];

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SPENDLOG_HOME` and from there it loads `$SPENDLOG_HOME/config.json`. It provides
/// the stores for the files that live in, or are configured relative to, the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    records: RecordStore,
    categories: CategoryStore,
}

impl Config {
    /// Creates the home directory and:
    /// - Creates an initial `config.json` with default budgets, unless one already exists
    /// - Creates the data and reports directories, a header-only expenses file and the default
    ///   categories file, leaving existing files alone
    ///
    /// # Errors
    /// - `Config` if the home directory or an existing config file cannot be used.
    /// - `Io` if the data files cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .context("Unable to create the spendlog home directory")
            .pub_result(ErrorType::Config)?;
        let root = utils::canonicalize(&maybe_relative).pub_result(ErrorType::Config)?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = if config_path.is_file() {
            debug!("Keeping the existing config file {}", config_path.display());
            ConfigFile::load(&config_path).pub_result(ErrorType::Config)?
        } else {
            let config_file = ConfigFile::default();
            config_file
                .save(&config_path)
                .pub_result(ErrorType::Config)?;
            config_file
        };

        let config = Self::new(root, config_path, config_file);
        config.records.ensure_storage()?;
        config.categories.ensure()?;
        Ok(config)
    }

    /// This will
    /// - validate that the home directory exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        if !maybe_relative.is_dir() {
            return Err(Error::new(
                ErrorType::Config,
                anyhow::anyhow!(
                    "The spendlog home directory '{}' is missing, run 'spendlog init' first",
                    maybe_relative.display()
                ),
            ));
        }
        let root = utils::canonicalize(&maybe_relative).pub_result(ErrorType::Config)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            return Err(Error::new(
                ErrorType::Config,
                anyhow::anyhow!(
                    "The config file is missing '{}', run 'spendlog init' first",
                    config_path.display()
                ),
            ));
        }
        let config_file = ConfigFile::load(&config_path).pub_result(ErrorType::Config)?;
        Ok(Self::new(root, config_path, config_file))
    }

    fn new(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let expenses = resolve(&root, config_file.expenses_path());
        let categories = resolve(&root, config_file.categories_path());
        let reports = root.join(DATA).join(REPORTS);
        Self {
            records: RecordStore::new(expenses, reports),
            categories: CategoryStore::new(categories),
            root,
            config_path,
            config_file,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The store for the expenses CSV file.
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// The store for the categories JSON file.
    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    /// Monthly budget per category.
    pub fn budgets(&self) -> &BTreeMap<String, Amount> {
        &self.config_file.budgets
    }
}

/// Checks if `p` is relative, and if so, resolves it against `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "spendlog",
///   "config_version": 1,
///   "budgets": {
///     "Food": "300.00",
///     "Transport": "150.00"
///   },
///   "expenses_path": "data/expenses.csv",
///   "categories_path": "data/categories.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "spendlog"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Monthly budget per category. Categories that are not listed get no budget warnings.
    #[serde(default = "default_budgets")]
    budgets: BTreeMap<String, Amount>,

    /// Path to the expenses CSV file (optional, relative to `$SPENDLOG_HOME` or absolute)
    /// Defaults to $SPENDLOG_HOME/data/expenses.csv if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expenses_path: Option<PathBuf>,

    /// Path to the categories JSON file (optional, relative to `$SPENDLOG_HOME` or absolute)
    /// Defaults to $SPENDLOG_HOME/data/categories.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    categories_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            budgets: default_budgets(),
            expenses_path: None,
            categories_path: None,
        }
    }
}

fn default_budgets() -> BTreeMap<String, Amount> {
    DEFAULT_BUDGETS
        .iter()
        .map(|(category, budget)| (category.to_string(), Amount::new(Decimal::from(*budget))))
        .collect()
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }

    /// Gets the expenses path. Relative paths are relative to `$SPENDLOG_HOME`.
    fn expenses_path(&self) -> PathBuf {
        self.expenses_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA).join(EXPENSES_CSV))
    }

    /// Gets the categories path. Relative paths are relative to `$SPENDLOG_HOME`.
    fn categories_path(&self) -> PathBuf {
        self.categories_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA).join(CATEGORIES_JSON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("spendlog_home");

        let config = Config::create(&home).unwrap();

        assert!(config.config_path().is_file());
        assert!(config.records().path().is_file());
        assert!(config.records().reports().is_dir());
        assert!(config.categories().path().is_file());
        assert_eq!(
            config.records().path(),
            config.root().join("data").join("expenses.csv")
        );
        assert_eq!(
            config.budgets().get("Food"),
            Some(&Amount::from_str("300").unwrap())
        );
    }

    #[test]
    fn test_config_create_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().to_owned();
        let config = Config::create(&home).unwrap();
        config.categories().save(["Travel"]).unwrap();

        let again = Config::create(&home).unwrap();
        assert_eq!(again.categories().load().unwrap().names(), ["Travel"]);
    }

    #[test]
    fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(created.records(), loaded.records());
        assert_eq!(created.budgets(), loaded.budgets());
    }

    #[test]
    fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
        assert!(err.to_string().contains("spendlog init"));
    }

    #[test]
    fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.budgets.len(), 6);
        assert_eq!(
            config.expenses_path(),
            PathBuf::from(DATA).join(EXPENSES_CSV)
        );
        assert_eq!(
            config.categories_path(),
            PathBuf::from(DATA).join(CATEGORIES_JSON)
        );
    }

    #[test]
    fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let saved = ConfigFile {
            expenses_path: Some(PathBuf::from("elsewhere/spend.csv")),
            ..ConfigFile::default()
        };
        saved.save(&config_path).unwrap();
        let loaded = ConfigFile::load(&config_path).unwrap();
        assert_eq!(saved, loaded);
    }

    #[test]
    fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "spendlog",
            "config_version": 1
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let config = ConfigFile::load(&config_path).unwrap();
        assert_eq!(config.budgets, default_budgets());
        assert!(config.expenses_path.is_none());
    }

    #[test]
    fn test_config_file_custom_budgets() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "spendlog",
            "config_version": 1,
            "budgets": { "Coffee": "$25" }
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let config = ConfigFile::load(&config_path).unwrap();
        assert_eq!(config.budgets.len(), 1);
        assert_eq!(config.budgets["Coffee"].to_string(), "25.00");
    }

    #[test]
    fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let result = ConfigFile::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_custom_absolute_paths() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        let elsewhere = dir.path().join("elsewhere.csv");
        let config_file = ConfigFile {
            expenses_path: Some(elsewhere.clone()),
            ..ConfigFile::default()
        };
        config_file.save(home.join(CONFIG_JSON)).unwrap();

        let config = Config::load(&home).unwrap();
        assert_eq!(config.records().path(), elsewhere);
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("expenses_path"));
        assert!(!json.contains("categories_path"));
    }
}

//! These structs provide the CLI interface for the spendlog CLI.

use crate::engine::{Filter, GroupBy};
use crate::model::{parse_date, Amount};
use crate::Result;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// spendlog: A command-line tool for tracking personal expenses.
///
/// Expenses are kept in a plain CSV file under $SPENDLOG_HOME. You can add, edit and delete
/// them, filter them by category, date range, month or keyword, summarize them, and export a
/// filtered view to a new CSV file. Monthly budgets per category are configured in
/// $SPENDLOG_HOME/config.json and reported on by the dashboard.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration and data files.
    ///
    /// By default the data directory is $HOME/spendlog. Pass --home or set SPENDLOG_HOME to put
    /// it somewhere else. Existing files are left alone, so it is safe to run this again.
    Init,
    /// Record a new expense.
    Add(AddArgs),
    /// List the expenses that match the filters, with their index.
    List(FilterArgs),
    /// Change an existing expense. Fields that are not given keep their current values.
    Edit(EditArgs),
    /// Delete the expense at an index. The expenses after it move up by one.
    Delete(DeleteArgs),
    /// Delete the most recently added expense.
    Undo,
    /// Show totals grouped by category, date or month.
    Summary(SummaryArgs),
    /// Show an overview of all expenses and the budget status for a month.
    Dashboard(DashboardArgs),
    /// Write the expenses that match the filters to a new CSV file.
    Export(ExportArgs),
    /// List, add or remove categories.
    Category(CategoryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber EnvFilter documentation.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where spendlog data and configuration is held. Defaults to ~/spendlog
    #[arg(long, env = "SPENDLOG_HOME", default_value_t = default_spendlog_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Filters that select which expenses a command works on. Every filter that is given must match.
#[derive(Debug, Default, Parser, Clone)]
pub struct FilterArgs {
    /// Only expenses in this category (case-insensitive). "All" matches every category.
    #[arg(long)]
    category: Option<String>,

    /// Only expenses on or after this date, YYYY-MM-DD.
    #[arg(long)]
    start: Option<String>,

    /// Only expenses on or before this date, YYYY-MM-DD.
    #[arg(long)]
    end: Option<String>,

    /// Only expenses whose date, amount, category or description contains this text
    /// (case-insensitive).
    #[arg(long)]
    keyword: Option<String>,

    /// Only expenses in this month, YYYY-MM. "All" matches every month.
    #[arg(long)]
    month: Option<String>,
}

impl FilterArgs {
    pub fn new(
        category: Option<String>,
        start: Option<String>,
        end: Option<String>,
        keyword: Option<String>,
        month: Option<String>,
    ) -> Self {
        Self {
            category,
            start,
            end,
            keyword,
            month,
        }
    }

    /// Converts the arguments into a `Filter`.
    ///
    /// # Errors
    /// - `Validation` if `start` or `end` is given but is not a `YYYY-MM-DD` date.
    pub fn to_filter(&self) -> Result<Filter> {
        for date in [&self.start, &self.end].into_iter().flatten() {
            parse_date(date)?;
        }
        Ok(Filter {
            category: self.category.clone(),
            start: self.start.as_ref().map(|s| s.trim().to_string()),
            end: self.end.as_ref().map(|s| s.trim().to_string()),
            keyword: self.keyword.clone(),
            month: self.month.clone(),
        })
    }
}

/// Args for the `spendlog add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The date of the expense, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// The amount, e.g. 12.50. It cannot be negative.
    #[arg(long)]
    amount: Amount,

    /// The category, e.g. Food. It is stored in title case.
    #[arg(long)]
    category: String,

    /// A free-text description.
    #[arg(long)]
    description: Option<String>,
}

impl AddArgs {
    pub fn new(
        date: Option<String>,
        amount: Amount,
        category: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
            description,
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Args for the `spendlog edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The index of the expense, as shown by `spendlog list`.
    index: usize,

    /// The new date, YYYY-MM-DD.
    #[arg(long)]
    date: Option<String>,

    /// The new amount.
    #[arg(long)]
    amount: Option<Amount>,

    /// The new category.
    #[arg(long)]
    category: Option<String>,

    /// The new description.
    #[arg(long)]
    description: Option<String>,
}

impl EditArgs {
    pub fn new(
        index: usize,
        date: Option<String>,
        amount: Option<Amount>,
        category: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            index,
            date,
            amount,
            category,
            description,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Args for the `spendlog delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The index of the expense, as shown by `spendlog list`.
    index: usize,
}

impl DeleteArgs {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Args for the `spendlog summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// What to group the totals by.
    #[arg(long, value_enum, default_value_t = GroupBy::Category)]
    by: GroupBy,

    #[clap(flatten)]
    filter: FilterArgs,
}

impl SummaryArgs {
    pub fn new(by: GroupBy, filter: FilterArgs) -> Self {
        Self { by, filter }
    }

    pub fn by(&self) -> GroupBy {
        self.by
    }

    pub fn filter(&self) -> &FilterArgs {
        &self.filter
    }
}

/// Args for the `spendlog dashboard` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct DashboardArgs {
    /// The month to report budgets for, YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<String>,
}

impl DashboardArgs {
    pub fn new(month: Option<String>) -> Self {
        Self { month }
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }
}

/// Args for the `spendlog export` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ExportArgs {
    /// Export every expense and ignore the filters.
    #[arg(long)]
    all: bool,

    /// Where to write the file. Defaults to a timestamped file in $SPENDLOG_HOME/data/reports.
    #[arg(long)]
    output: Option<PathBuf>,

    #[clap(flatten)]
    filter: FilterArgs,
}

impl ExportArgs {
    pub fn new(all: bool, output: Option<PathBuf>, filter: FilterArgs) -> Self {
        Self {
            all,
            output,
            filter,
        }
    }

    pub fn all(&self) -> bool {
        self.all
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn filter(&self) -> &FilterArgs {
        &self.filter
    }
}

/// Args for the `spendlog category` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoryArgs {
    #[command(subcommand)]
    action: CategorySubcommand,
}

impl CategoryArgs {
    pub fn new(action: CategorySubcommand) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &CategorySubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Print the categories.
    List,
    /// Add a category. The name is stored in title case.
    Add(CategoryNameArgs),
    /// Remove a category. The name must match a stored name exactly.
    Remove(CategoryNameArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CategoryNameArgs {
    /// The category name.
    name: String,
}

impl CategoryNameArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn default_spendlog_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("spendlog"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SPENDLOG_HOME instead of relying on the default \
                spendlog home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("spendlog")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorType;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("spendlog").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_add() {
        let args = parse(&[
            "--home",
            "/tmp/x",
            "add",
            "--amount",
            "12.5",
            "--category",
            "food",
            "--date",
            "2025-01-01",
        ]);
        assert_eq!(args.common().home().path(), Path::new("/tmp/x"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.amount().to_string(), "12.50");
                assert_eq!(add.category(), "food");
                assert_eq!(add.date(), Some("2025-01-01"));
                assert_eq!(add.description(), None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_rejects_bad_amount() {
        let result = Args::try_parse_from([
            "spendlog",
            "add",
            "--amount",
            "lots",
            "--category",
            "Food",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_summary_defaults_to_category() {
        let args = parse(&["summary", "--month", "2025-01"]);
        match args.command() {
            Command::Summary(summary) => {
                assert_eq!(summary.by(), GroupBy::Category);
                let filter = summary.filter().to_filter().unwrap();
                assert_eq!(filter.month.as_deref(), Some("2025-01"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_summary_by_month() {
        let args = parse(&["summary", "--by", "month"]);
        match args.command() {
            Command::Summary(summary) => assert_eq!(summary.by(), GroupBy::Month),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_category_remove() {
        let args = parse(&["category", "remove", "Food"]);
        match args.command() {
            Command::Category(c) => match c.action() {
                CategorySubcommand::Remove(name) => assert_eq!(name.name(), "Food"),
                other => panic!("unexpected action {other:?}"),
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_level() {
        let args = parse(&["--log-level", "debug", "undo"]);
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_filter_args_reject_bad_dates() {
        let args = FilterArgs::new(None, Some("2025-1-5".to_string()), None, None, None);
        let err = args.to_filter().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);

        let args = FilterArgs::new(None, None, Some("2025-02-30".to_string()), None, None);
        assert!(args.to_filter().is_err());
    }

    #[test]
    fn test_filter_args_to_filter() {
        let args = FilterArgs::new(
            Some("Food".to_string()),
            Some(" 2025-01-01 ".to_string()),
            Some("2025-01-31".to_string()),
            Some("lunch".to_string()),
            None,
        );
        let filter = args.to_filter().unwrap();
        assert_eq!(
            filter,
            Filter::new()
                .category("Food")
                .start("2025-01-01")
                .end("2025-01-31")
                .keyword("lunch")
        );
    }
}

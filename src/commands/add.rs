use crate::args::AddArgs;
use crate::commands::{Out, Row};
use crate::model::{Expense, DATE_FORMAT};
use crate::{Config, Result};

/// Appends a new expense to the record file.
///
/// When no date is given, today's local date is used. The category is stored in title case and
/// the description is trimmed. A category that is not in the category list yet is added to it.
///
/// # Errors
/// - `Validation` if the date is invalid, the amount is negative or the category is blank.
/// - `Io` if the record file cannot be read or written.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Row>> {
    let date = match args.date() {
        Some(date) => date.to_string(),
        None => chrono::Local::now().format(DATE_FORMAT).to_string(),
    };
    let expense = Expense::new(
        date,
        args.amount(),
        args.category(),
        args.description().unwrap_or_default(),
    );
    let index = config.records().append(expense.clone())?;
    let row = Row::new(index, expense.normalized());

    let mut message = format!("Added {}", row.label());
    if !config.categories().load()?.contains(&row.expense.category) {
        let added = config.categories().add(&row.expense.category)?;
        message.push_str(&format!("\nAdded new category '{added}'"));
    }
    Ok(Out::new(message, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use crate::ErrorType;
    use std::str::FromStr;

    fn args(date: Option<&str>, amount: &str, category: &str) -> AddArgs {
        AddArgs::new(
            date.map(String::from),
            crate::model::Amount::from_str(amount).unwrap(),
            category,
            Some(" lunch ".to_string()),
        )
    }

    #[test]
    fn test_add() {
        let env = TestEnv::new();
        let out = add(env.config(), args(Some("2025-01-01"), "12.5", "food")).unwrap();
        let row = out.structure().unwrap();
        assert_eq!(row.index, 0);
        assert_eq!(row.expense.category, "Food");
        assert_eq!(row.expense.amount.to_string(), "12.50");
        assert_eq!(row.expense.description, "lunch");
        assert_eq!(out.message(), "Added [0] 2025-01-01 | $12.50 | Food | lunch");

        let content = std::fs::read_to_string(env.config().records().path()).unwrap();
        assert_eq!(
            content,
            "date,amount,category,description\n2025-01-01,12.50,Food,lunch\n"
        );
    }

    #[test]
    fn test_add_registers_new_category() {
        let env = TestEnv::new();
        let out = add(env.config(), args(Some("2025-01-01"), "40", "travel")).unwrap();
        assert!(out.message().ends_with("Added new category 'Travel'"));
        let categories = env.config().categories().load().unwrap();
        assert!(categories.contains("Travel"));
        assert_eq!(categories.len(), 7);
    }

    #[test]
    fn test_add_known_category_leaves_list_alone() {
        let env = TestEnv::new();
        let path = env.config().categories().path().to_path_buf();
        let before = std::fs::read(&path).unwrap();
        let out = add(env.config(), args(Some("2025-01-01"), "4", "FOOD")).unwrap();
        assert!(!out.message().contains("new category"));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_add_defaults_to_today() {
        let env = TestEnv::new();
        let out = add(env.config(), args(None, "1", "Other")).unwrap();
        let today = chrono::Local::now().format(DATE_FORMAT).to_string();
        assert_eq!(out.structure().unwrap().expense.date, today);
    }

    #[test]
    fn test_add_rejects_negative_amount() {
        let env = TestEnv::new();
        let err = add(env.config(), args(Some("2025-01-01"), "-3", "Food")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(env.expenses().is_empty());
    }

    #[test]
    fn test_add_rejects_blank_category() {
        let env = TestEnv::new();
        let err = add(env.config(), args(Some("2025-01-01"), "3", "  ")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }
}

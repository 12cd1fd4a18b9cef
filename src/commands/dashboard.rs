use crate::args::DashboardArgs;
use crate::commands::{Out, Row};
use crate::engine::{
    aggregate_by, budget_status, count, date_range, month_totals, recent, total, BudgetStatus,
    DateSpan, Group, GroupBy,
};
use crate::error::Error;
use crate::model::{parse_date, Amount};
use crate::{Config, Result};
use serde::Serialize;

/// The number of rows shown under "Recent expenses".
const RECENT: usize = 10;

/// Everything the dashboard shows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Dashboard {
    pub total: Amount,
    pub count: usize,
    pub date_range: Option<DateSpan>,
    pub recent: Vec<Row>,
    pub by_category: Vec<Group>,
    pub by_month: Vec<Group>,
    /// The `YYYY-MM` month that `budgets` is computed for.
    pub month: String,
    /// Whether any expense falls in `month`.
    pub month_has_expenses: bool,
    pub budgets: Vec<BudgetStatus>,
}

/// Builds an overview of the whole record file and the budget status of one month, by default
/// the current month.
///
/// # Errors
/// - `Validation` if `args.month()` is not a `YYYY-MM` month.
pub fn dashboard(config: Config, args: DashboardArgs) -> Result<Out<Dashboard>> {
    let month = match args.month() {
        Some(month) => {
            let month = month.trim();
            parse_date(&format!("{month}-01")).map_err(|_| {
                Error::validation(format!("Invalid month '{month}', expected YYYY-MM"))
            })?;
            month.to_string()
        }
        None => chrono::Local::now().format("%Y-%m").to_string(),
    };

    let table = config.records().load()?;
    if table.is_empty() {
        return Ok("No expenses yet, use 'spendlog add' to create your first entry".into());
    }

    let totals = month_totals(&table, &month);
    let dashboard = Dashboard {
        total: total(&table),
        count: count(&table),
        date_range: date_range(&table),
        recent: recent(&table, RECENT)
            .into_iter()
            .map(|(ix, e)| Row::new(ix, e.clone()))
            .collect(),
        by_category: aggregate_by(&table, GroupBy::Category),
        by_month: aggregate_by(&table, GroupBy::Month),
        month,
        month_has_expenses: !totals.is_empty(),
        budgets: budget_status(&totals, config.budgets()),
    };
    Ok(Out::new(render(&dashboard), dashboard))
}

fn render(d: &Dashboard) -> String {
    let (start, end) = match &d.date_range {
        Some(span) => (span.start.as_str(), span.end.as_str()),
        None => ("-", "-"),
    };
    let mut lines = vec![
        format!("Total: {}", d.total.to_currency()),
        format!("Entries: {}", d.count),
        format!("Start: {start}"),
        format!("End: {end}"),
        String::new(),
        "Recent expenses:".to_string(),
    ];
    lines.extend(d.recent.iter().map(|r| format!("  {}", r.label())));

    lines.push(String::new());
    lines.push("Category breakdown:".to_string());
    lines.extend(
        d.by_category
            .iter()
            .map(|g| format!("  {}: {}", g.key, g.total.to_currency())),
    );

    lines.push(String::new());
    lines.push("Monthly spending trend:".to_string());
    lines.extend(
        d.by_month
            .iter()
            .map(|g| format!("  {}: {}", g.key, g.total.to_currency())),
    );

    lines.push(String::new());
    lines.push(format!("Monthly budget warnings ({}):", d.month));
    if !d.month_has_expenses {
        lines.push("  No expenses recorded for this month yet.".to_string());
    } else if d.budgets.is_empty() {
        lines.push("  No budgets defined for the categories used this month.".to_string());
    } else {
        lines.extend(d.budgets.iter().map(|b| format!("  {}", b.describe())));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BudgetLevel;
    use crate::test::TestEnv;
    use crate::ErrorType;

    fn for_month(month: &str) -> DashboardArgs {
        DashboardArgs::new(Some(month.to_string()))
    }

    #[test]
    fn test_dashboard() {
        let env = TestEnv::with_sample_expenses();
        let out = dashboard(env.config(), for_month("2025-01")).unwrap();
        let d = out.structure().unwrap();
        assert_eq!(d.total.to_string(), "52.00");
        assert_eq!(d.count, 5);
        assert_eq!(
            d.date_range,
            Some(DateSpan {
                start: "2025-01-15".to_string(),
                end: "2025-02-28".to_string(),
            })
        );
        assert_eq!(d.recent.len(), 5);
        assert_eq!(d.by_category[0].key, "Bills");
        assert_eq!(d.by_month.len(), 2);

        // Food 12.75 / 300 and Transport 5.25 / 150, both within budget.
        assert_eq!(d.budgets.len(), 2);
        assert!(d.budgets.iter().all(|b| b.level == BudgetLevel::Within));
        assert!(out
            .message()
            .contains("Food: $12.75 / $300.00 (within budget)"));
    }

    #[test]
    fn test_dashboard_recent_is_last_ten() {
        let env = TestEnv::new();
        for day in 1..=12 {
            env.insert_expense(&format!("2025-03-{day:02}"), "1", "Food", "");
        }
        let out = dashboard(env.config(), for_month("2025-03")).unwrap();
        let d = out.structure().unwrap();
        let indexes: Vec<usize> = d.recent.iter().map(|r| r.index).collect();
        assert_eq!(indexes, (2..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_dashboard_over_budget() {
        let env = TestEnv::new();
        env.insert_expense("2025-04-02", "250", "Food", "party");
        env.insert_expense("2025-04-09", "60", "Food", "groceries");
        env.insert_expense("2025-04-10", "500", "Gifts", "no budget");
        let out = dashboard(env.config(), for_month("2025-04")).unwrap();
        let d = out.structure().unwrap();
        assert_eq!(d.budgets.len(), 1);
        assert_eq!(d.budgets[0].level, BudgetLevel::Over);
        assert!(out
            .message()
            .contains("Food: $310.00 / $300.00 (OVER budget)"));
    }

    #[test]
    fn test_dashboard_month_without_expenses() {
        let env = TestEnv::with_sample_expenses();
        let out = dashboard(env.config(), for_month("2024-12")).unwrap();
        let d = out.structure().unwrap();
        assert!(!d.month_has_expenses);
        assert!(d.budgets.is_empty());
        assert!(out
            .message()
            .contains("No expenses recorded for this month yet."));
    }

    #[test]
    fn test_dashboard_only_unbudgeted_categories() {
        let env = TestEnv::new();
        env.insert_expense("2025-05-01", "5", "Gifts", "");
        let out = dashboard(env.config(), for_month("2025-05")).unwrap();
        assert!(out
            .message()
            .contains("No budgets defined for the categories used this month."));
    }

    #[test]
    fn test_dashboard_empty() {
        let env = TestEnv::new();
        let out = dashboard(env.config(), DashboardArgs::default()).unwrap();
        assert!(out.structure().is_none());
        assert!(out.message().starts_with("No expenses yet"));
    }

    #[test]
    fn test_dashboard_invalid_month() {
        let env = TestEnv::with_sample_expenses();
        let err = dashboard(env.config(), for_month("2025-13")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }
}

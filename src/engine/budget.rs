use crate::model::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spending at or above this share of the budget is `Near`.
fn near_ratio() -> Decimal {
    Decimal::new(8, 1)
}

/// How a category's spending compares with its budget.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    Within,
    Near,
    Over,
}

serde_plain::derive_display_from_serialize!(BudgetLevel);
serde_plain::derive_fromstr_from_deserialize!(BudgetLevel);

impl BudgetLevel {
    /// Classifies `total` against a non-zero `budget`.
    pub fn classify(total: Amount, budget: Amount) -> BudgetLevel {
        if total >= budget {
            BudgetLevel::Over
        } else if total.value() >= budget * near_ratio() {
            BudgetLevel::Near
        } else {
            BudgetLevel::Within
        }
    }
}

/// One category's spending for a month against its budget.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub total: Amount,
    pub budget: Amount,
    pub level: BudgetLevel,
}

impl BudgetStatus {
    /// e.g. `Food: $290.00 / $300.00 (close to budget)`
    pub fn describe(&self) -> String {
        let level = match self.level {
            BudgetLevel::Over => "OVER budget",
            BudgetLevel::Near => "close to budget",
            BudgetLevel::Within => "within budget",
        };
        format!(
            "{}: {} / {} ({level})",
            self.category,
            self.total.to_currency(),
            self.budget.to_currency()
        )
    }
}

/// Classifies each category in `monthly_totals` that has a budget. Categories with no budget, or
/// a zero budget, are left out. The result is in category order.
pub fn budget_status(
    monthly_totals: &BTreeMap<String, Amount>,
    budgets: &BTreeMap<String, Amount>,
) -> Vec<BudgetStatus> {
    monthly_totals
        .iter()
        .filter_map(|(category, total)| {
            let budget = budgets.get(category).filter(|b| !b.is_zero())?;
            Some(BudgetStatus {
                category: category.clone(),
                total: *total,
                budget: *budget,
                level: BudgetLevel::classify(*total, *budget),
            })
        })
        .collect()
}

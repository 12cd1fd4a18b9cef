//! Queries and aggregations over an in-memory table. Nothing in this module does I/O.

mod aggregate;
mod budget;
mod filter;

pub use aggregate::{
    aggregate_by, count, date_range, known_categories, month_totals, months, recent, total,
    DateSpan, Group, GroupBy,
};
pub use budget::{budget_status, BudgetLevel, BudgetStatus};
pub use filter::{filter, filter_indexed, Filter, ALL};

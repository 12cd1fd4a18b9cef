//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
mod column;
mod expense;
mod name;

pub use amount::{Amount, AmountError};
pub use column::Column;
pub use expense::{parse_date, Expense, Expenses, DATE_FORMAT};
pub use name::{canonical_name, normalize_names, title_case};

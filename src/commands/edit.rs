use crate::args::EditArgs;
use crate::commands::{Out, Row};
use crate::error::Error;
use crate::model::Expense;
use crate::{Config, Result};

/// Replaces the expense at `args.index()`. Fields that are not given keep their current values.
/// The edited expense is validated and normalized the same way a new one is.
///
/// # Errors
/// - `NotFound` if there is no expense at the index.
/// - `Validation` if the edited expense is rejected. Nothing is written.
pub fn edit(config: Config, args: EditArgs) -> Result<Out<Row>> {
    let index = args.index();
    let table = config.records().load()?;
    let current = table
        .get(index)
        .ok_or_else(|| Error::not_found(format!("There is no expense at index {index}")))?;

    let edited = Expense::new(
        args.date().unwrap_or(&current.date),
        args.amount().unwrap_or(current.amount),
        args.category().unwrap_or(&current.category),
        args.description().unwrap_or(&current.description),
    );
    config.records().update(index, edited.clone())?;
    let row = Row::new(index, edited.normalized());
    Ok(Out::new(format!("Updated {}", row.label()), row))
}

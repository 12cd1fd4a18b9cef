use crate::args::FilterArgs;
use crate::commands::{plural, Out, Row};
use crate::engine::filter_indexed;
use crate::{Config, Result};

/// Lists the expenses that match `args`, one line per expense. Each line starts with the index
/// that `edit` and `delete` take.
pub fn list(config: Config, args: FilterArgs) -> Result<Out<Vec<Row>>> {
    let filter = args.to_filter()?;
    let table = config.records().load()?;
    let rows: Vec<Row> = filter_indexed(&table, &filter)
        .map(|(ix, e)| Row::new(ix, e.clone()))
        .collect();

    if rows.is_empty() {
        let message = if table.is_empty() {
            "No expenses yet, use 'spendlog add' to create your first entry"
        } else {
            "No expenses match the filters"
        };
        return Ok(Out::new(message, rows));
    }

    let total: crate::model::Amount = rows.iter().map(|r| r.expense.amount).sum();
    let mut lines: Vec<String> = rows.iter().map(Row::label).collect();
    lines.push(format!(
        "{}, total {}",
        plural(rows.len(), "expense", "expenses"),
        total.to_currency()
    ));
    Ok(Out::new(lines.join("\n"), rows))
}

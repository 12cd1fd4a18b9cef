use crate::args::SummaryArgs;
use crate::commands::{plural, Out};
use crate::engine::{aggregate_by, filter, total, Group};
use crate::{Config, Result};

/// Totals the expenses that match the filters, grouped by `args.by()`.
pub fn summary(config: Config, args: SummaryArgs) -> Result<Out<Vec<Group>>> {
    let filter_value = args.filter().to_filter()?;
    let table = config.records().load()?;
    let view = filter(&table, &filter_value);
    let groups = aggregate_by(&view, args.by());

    if groups.is_empty() {
        return Ok(Out::new("No expenses to summarize", groups));
    }

    let mut lines = vec![format!("Totals by {}:", args.by())];
    lines.extend(
        groups
            .iter()
            .map(|g| format!("  {}: {}", display_key(&g.key), g.total.to_currency())),
    );
    lines.push(format!(
        "{} in {}, total {}",
        plural(view.len(), "expense", "expenses"),
        plural(groups.len(), "group", "groups"),
        total(&view).to_currency()
    ));
    Ok(Out::new(lines.join("\n"), groups))
}

fn display_key(key: &str) -> &str {
    if key.is_empty() {
        "(none)"
    } else {
        key
    }
}

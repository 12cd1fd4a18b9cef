//! Delete command handlers.

use crate::args::DeleteArgs;
use crate::commands::{Out, Row};
use crate::{Config, Result};

/// Deletes the expense at `args.index()`. The expenses after it move up by one index.
///
/// # Errors
/// - `NotFound` if there is no expense at the index. Nothing is written.
pub fn delete(config: Config, args: DeleteArgs) -> Result<Out<Row>> {
    let removed = config.records().delete(args.index())?;
    let row = Row::new(args.index(), removed);
    Ok(Out::new(format!("Deleted {}", row.label()), row))
}

/// Deletes the last expense in the record file. When there are no expenses nothing happens and
/// the returned `Out` has no structure.
pub fn undo(config: Config) -> Result<Out<Row>> {
    let records = config.records();
    let index = records.load()?.len().saturating_sub(1);
    match records.delete_last()? {
        Some(removed) => {
            let row = Row::new(index, removed);
            Ok(Out::new(format!("Removed the last entry {}", row.label()), row))
        }
        None => Ok("Nothing to undo".into()),
    }
}

use crate::args::ExportArgs;
use crate::commands::{plural, Out};
use crate::engine::filter;
use crate::error::{ErrorType, IntoResult};
use crate::{utils, Config, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

/// Writes the expenses that match the filters, or every expense with `--all`, to a CSV file in
/// the same format as the record file.
///
/// The file goes to `args.output()` when given, otherwise to the reports directory as
/// `expenses_view_YYYYMMDD_HHMMSS.csv` (or `expenses_all_...` with `--all`).
///
/// Returns the path of the written file.
pub fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let table = config.records().load()?;
    let view = if args.all() {
        table
    } else {
        filter(&table, &args.filter().to_filter()?)
    };
    let data = config.records().export(&view)?;

    let path = match args.output() {
        Some(output) => output.to_path_buf(),
        None => {
            let kind = if args.all() { "all" } else { "view" };
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            config
                .records()
                .reports()
                .join(format!("expenses_{kind}_{stamp}.csv"))
        }
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            utils::make_dir(parent).pub_result(ErrorType::Io)?;
        }
    }
    debug!("Writing {} bytes to {}", data.len(), path.display());
    utils::write(&path, data)
        .context("Unable to write the export file")
        .pub_result(ErrorType::Io)?;

    Ok(Out::new(
        format!(
            "Exported {} to {}",
            plural(view.len(), "expense", "expenses"),
            path.display()
        ),
        path,
    ))
}

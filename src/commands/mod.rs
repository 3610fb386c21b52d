mod generate;
mod info;
mod init;
mod list;
mod update;

pub use generate::handle_generate;
pub use info::handle_info;
pub use init::handle_init;
pub use list::handle_list;
pub use update::handle_update;

use log::debug;

use crate::context::Context;
use crate::error::{NtsError, Result};
use crate::operations::BulkSummary;

/// Print the closing `<verb> complete` line for a bulk run.
///
/// Per-project outcomes were already reported by the tasks themselves; only
/// tasks that died without reporting are mentioned here.
fn report_summary<O>(verb: &str, results: &[(String, Result<O>)], ctx: &Context) -> BulkSummary {
    for (name, result) in results {
        if let Err(e @ NtsError::TaskFailed(_)) = result {
            ctx.reporter.error(&format!("{}: {}", name, e));
        }
    }

    let summary = BulkSummary::from_results(results);
    debug!("report_summary: {} finished for {} project(s)", verb, summary.total());
    ctx.reporter.info(&format!(
        "{} complete: {} succeeded, {} failed",
        verb, summary.succeeded, summary.failed
    ));
    summary
}

fn report_empty(ctx: &Context) -> BulkSummary {
    ctx.reporter.info("No projects configured");
    BulkSummary::default()
}

use log::info;

use crate::context::Context;
use crate::operations::{self, BulkSummary};
use crate::projects::ProjectConfig;

use super::{report_empty, report_summary};

pub async fn handle_info(projects: ProjectConfig, ctx: &Context) -> BulkSummary {
    if projects.is_empty() {
        return report_empty(ctx);
    }

    info!("handle_info: querying {} project(s)", projects.len());

    let task_ctx = ctx.clone();
    let results = operations::run_all(projects, move |name, _project| {
        let ctx = task_ctx.clone();
        async move { operations::info_project(&name, &ctx).await }
    })
    .await;

    report_summary("Info", &results, ctx)
}

use log::debug;

use crate::context::Context;
use crate::error::{NtsError, Result};
use crate::projects::Project;

/// Check out one project into `<base_dir>/<name>`.
pub async fn checkout_project(name: &str, project: &Project, ctx: &Context) -> Result<()> {
    debug!(
        "checkout_project: '{}' from '{}' into {}",
        name,
        project.url(),
        ctx.working_copy(name).display()
    );

    let outcome = ctx
        .client
        .checkout(
            name,
            project.url(),
            &ctx.base_dir,
            &*ctx.reporter,
            ctx.stream_mode(),
        )
        .await;

    match outcome {
        Ok(outcome) if outcome.success() => {
            ctx.reporter
                .success(&format!("{}: checked out successfully.", name));
            Ok(())
        }
        Ok(_) => {
            ctx.reporter.error(&format!("{}: failed to check out!", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
        Err(e) => {
            ctx.reporter.error(&format!("{}: {}", name, e));
            ctx.reporter.error(&format!("{}: failed to check out!", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
    }
}

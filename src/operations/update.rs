use log::debug;

use crate::context::Context;
use crate::error::{NtsError, Result};

/// Run `update` in one project's working copy.
pub async fn update_project(name: &str, ctx: &Context) -> Result<()> {
    let working_copy = ctx.working_copy(name);
    debug!("update_project: '{}' in {}", name, working_copy.display());

    if !working_copy.is_dir() {
        ctx.reporter.error(&format!(
            "{}: no working copy at {}",
            name,
            working_copy.display()
        ));
        ctx.reporter.error(&format!("{}: failed to update!", name));
        return Err(NtsError::ProjectFailed(name.to_string()));
    }

    let outcome = ctx
        .client
        .update(name, &working_copy, &*ctx.reporter, ctx.stream_mode())
        .await;

    match outcome {
        Ok(outcome) if outcome.success() => {
            ctx.reporter
                .success(&format!("{}: updated successfully.", name));
            Ok(())
        }
        Ok(_) => {
            ctx.reporter.error(&format!("{}: failed to update!", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
        Err(e) => {
            ctx.reporter.error(&format!("{}: {}", name, e));
            ctx.reporter.error(&format!("{}: failed to update!", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
    }
}

use log::debug;

use crate::context::Context;
use crate::error::{NtsError, Result};

/// Run `info` in one project's working copy and report the raw output.
pub async fn info_project(name: &str, ctx: &Context) -> Result<String> {
    let working_copy = ctx.working_copy(name);
    debug!("info_project: '{}' in {}", name, working_copy.display());

    if !working_copy.is_dir() {
        ctx.reporter.error(&format!(
            "{}: no working copy at {}",
            name,
            working_copy.display()
        ));
        ctx.reporter.error(&format!("{} failed", name));
        return Err(NtsError::ProjectFailed(name.to_string()));
    }

    match ctx.client.info(name, &working_copy, &*ctx.reporter).await {
        Ok(outcome) if outcome.success() => {
            ctx.reporter
                .info(&format!("{}: {}\n", name, outcome.stdout.trim_end()));
            Ok(outcome.stdout)
        }
        Ok(_) => {
            ctx.reporter.error(&format!("{} failed", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
        Err(e) => {
            ctx.reporter.error(&format!("{}: {}", name, e));
            ctx.reporter.error(&format!("{} failed", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
    }
}

use log::{error, info};
use std::path::Path;

use crate::context::Context;
use crate::error::{NtsError, Result};
use crate::operations::{self, describe_working_copy, discover_working_copies};
use crate::projects::ProjectConfig;

use super::report_summary;

/// `generate sample` writes the example config; plain `generate` rebuilds
/// the config from the working copies under the base directory.
pub async fn handle_generate(sample: bool, config_file: &Path, ctx: &Context) -> Result<()> {
    let target = ctx.base_dir.join(config_file);

    if sample {
        info!("handle_generate: writing sample to {}", target.display());
        write_config(&ProjectConfig::sample(), &target, ctx);
        return Ok(());
    }

    let found = discover_working_copies(&ctx.base_dir)?;
    if found.is_empty() {
        return Err(NtsError::NoWorkingCopies(ctx.base_dir.clone()));
    }

    info!("handle_generate: describing {} working cop(ies)", found.len());

    let task_ctx = ctx.clone();
    let results = operations::run_all(found, move |name, path| {
        let ctx = task_ctx.clone();
        async move { describe_working_copy(&name, &path, &ctx).await }
    })
    .await;

    report_summary("Generate", &results, ctx);

    let mut config = ProjectConfig::default();
    for (name, result) in results {
        if let Ok(project) = result {
            config.insert(name, project);
        }
    }

    if config.is_empty() {
        ctx.reporter.error(&format!(
            "No working copy could be described, not writing {}",
            target.display()
        ));
        return Ok(());
    }

    write_config(&config, &target, ctx);
    Ok(())
}

/// Write failures are reported, never fatal.
fn write_config(config: &ProjectConfig, path: &Path, ctx: &Context) {
    match config.save(path) {
        Ok(()) => {
            info!("write_config: wrote {} project(s) to {}", config.len(), path.display());
            if ctx.verbose {
                ctx.reporter
                    .success(&format!("Wrote config to file: {}", path.display()));
            }
        }
        Err(e) => {
            error!("write_config: {}", e);
            ctx.reporter.error(&e.to_string());
        }
    }
}

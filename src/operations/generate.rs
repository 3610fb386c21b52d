use log::debug;
use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::error::{NtsError, Result};
use crate::projects::Project;

/// Name of the metadata directory that marks a Subversion working copy.
pub const METADATA_DIR: &str = ".svn";

/// Immediate subdirectories of `base_dir` that look like working copies,
/// sorted by name.
pub fn discover_working_copies(base_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();

    for entry in std::fs::read_dir(base_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if !path.join(METADATA_DIR).exists() {
            debug!("discover_working_copies: skipping {}", path.display());
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        found.push((name, path));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(
        "discover_working_copies: {} working cop(ies) in {}",
        found.len(),
        base_dir.display()
    );
    Ok(found)
}

/// Pull the repository URL out of `svn info` output.
pub fn parse_info_url(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("URL:"))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Run `info` against a discovered working copy and turn it into a project
/// record.
pub async fn describe_working_copy(name: &str, path: &Path, ctx: &Context) -> Result<Project> {
    let outcome = match ctx.client.info(name, path, &*ctx.reporter).await {
        Ok(outcome) => outcome,
        Err(e) => {
            ctx.reporter.error(&format!("{}: {}", name, e));
            return Err(NtsError::ProjectFailed(name.to_string()));
        }
    };

    debug!("describe_working_copy: {} ::: {}", path.display(), outcome.stdout.trim_end());
    if ctx.verbose {
        ctx.reporter
            .info(&format!("{} ::: {}", path.display(), outcome.stdout.trim_end()));
    }

    if !outcome.success() {
        ctx.reporter.error(&format!("{} failed", name));
        return Err(NtsError::ProjectFailed(name.to_string()));
    }

    match parse_info_url(&outcome.stdout) {
        Some(url) => Ok(Project::new(url)),
        None => {
            ctx.reporter
                .error(&format!("{}: no repository URL in info output", name));
            Err(NtsError::ProjectFailed(name.to_string()))
        }
    }
}

use log::info;

use crate::context::Context;
use crate::operations::{self, BulkSummary};
use crate::projects::ProjectConfig;

use super::{report_empty, report_summary};

pub async fn handle_init(projects: ProjectConfig, ctx: &Context) -> BulkSummary {
    if projects.is_empty() {
        return report_empty(ctx);
    }

    info!("handle_init: checking out {} project(s)", projects.len());

    let task_ctx = ctx.clone();
    let results = operations::run_all(projects, move |name, project| {
        let ctx = task_ctx.clone();
        async move { operations::checkout_project(&name, &project, &ctx).await }
    })
    .await;

    report_summary("Init", &results, ctx)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::projects::Project;
    use crate::test_support::{fake_client, memory_context};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_handle_init_checks_out_every_project() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("calls.log");
        let mut projects = ProjectConfig::default();
        projects.insert("alpha".to_string(), Project::new("https://svn/alpha/trunk"));
        projects.insert("beta".to_string(), Project::new("https://svn/beta/trunk"));
        let body = format!(
            "echo \"$(pwd)|$*\" >> '{}'\nmkdir \"$3\"\necho \"A    $3/file\"\n",
            log.display()
        );
        let client = fake_client(dir.path(), &body);
        let (ctx, reporter) = memory_context(client, dir.path(), true);

        let summary = handle_init(projects, &ctx).await;

        assert_eq!(summary, BulkSummary { succeeded: 2, failed: 0 });
        let mut calls: Vec<String> = std::fs::read_to_string(&log)
            .unwrap()
            .lines()
            .map(|l| l.rsplit('|').next().unwrap().to_string())
            .collect();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "checkout https://svn/alpha/trunk alpha",
                "checkout https://svn/beta/trunk beta"
            ]
        );
        assert!(dir.path().join("alpha").is_dir());
        assert!(dir.path().join("beta").is_dir());
        assert!(reporter.infos().contains(&"alpha: A    alpha/file".to_string()));
    }
}

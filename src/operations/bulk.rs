use log::{debug, error};
use std::future::Future;

use crate::error::{NtsError, Result};

/// Spawn one task per item and wait for every one of them.
///
/// All tasks start before any is awaited, so they run concurrently and
/// whatever they report reaches the console in completion order. The
/// returned vector has exactly one entry per item; a task that panicked
/// shows up as `TaskFailed`.
pub async fn run_all<T, O, I, F, Fut>(items: I, f: F) -> Vec<(String, Result<O>)>
where
    I: IntoIterator<Item = (String, T)>,
    F: Fn(String, T) -> Fut,
    Fut: Future<Output = Result<O>> + Send + 'static,
    O: Send + 'static,
{
    let handles: Vec<_> = items
        .into_iter()
        .map(|(name, item)| {
            let handle = tokio::spawn(f(name.clone(), item));
            (name, handle)
        })
        .collect();

    debug!("run_all: spawned {} task(s)", handles.len());

    let mut results = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        match handle.await {
            Ok(result) => results.push((name, result)),
            Err(e) => {
                error!("run_all: task for '{}' did not finish: {}", name, e);
                results.push((name, Err(NtsError::TaskFailed(e.to_string()))));
            }
        }
    }

    results
}

/// Succeeded/failed counts for one bulk run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BulkSummary {
    pub fn from_results<O>(results: &[(String, Result<O>)]) -> Self {
        let succeeded = results.iter().filter(|(_, r)| r.is_ok()).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{Client, OutputMode};
use crate::reporter::Reporter;

/// Everything a command needs besides the project list itself.
///
/// Cheap to clone; each spawned task gets its own copy.
#[derive(Clone)]
pub struct Context {
    pub client: Client,
    pub reporter: Arc<dyn Reporter>,
    /// Directory the working copies live in (the directory `nts` was run from).
    pub base_dir: PathBuf,
    pub verbose: bool,
}

impl Context {
    pub fn new(client: Client, reporter: Arc<dyn Reporter>, base_dir: PathBuf, verbose: bool) -> Self {
        Self {
            client,
            reporter,
            base_dir,
            verbose,
        }
    }

    /// A project's working copy is the subdirectory named after it.
    pub fn working_copy(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Live client output is only shown in verbose mode.
    pub fn stream_mode(&self) -> OutputMode {
        if self.verbose {
            OutputMode::Stream
        } else {
            OutputMode::Quiet
        }
    }
}

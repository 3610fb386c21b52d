use log::{debug, info, warn};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::{NtsError, Result};
use crate::reporter::Reporter;

/// What to do with the client's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Drain and drop it.
    Quiet,
    /// Forward each line to the reporter as it arrives.
    Stream,
    /// Collect it into `RunOutcome::stdout`.
    Buffer,
}

#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr_lines: usize,
}

impl RunOutcome {
    /// A run only counts as good if the client exited cleanly and said
    /// nothing on stderr.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && self.stderr_lines == 0
    }
}

/// Thin wrapper around the external version-control client binary.
#[derive(Debug, Clone)]
pub struct Client {
    program: String,
}

impl Client {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `<client> checkout <url> <name>`, run from `base_dir`.
    pub async fn checkout(
        &self,
        name: &str,
        url: &str,
        base_dir: &Path,
        reporter: &dyn Reporter,
        mode: OutputMode,
    ) -> Result<RunOutcome> {
        self.run(name, &["checkout", url, name], base_dir, reporter, mode)
            .await
    }

    /// `<client> info`, run inside the working copy.
    pub async fn info(
        &self,
        name: &str,
        working_copy: &Path,
        reporter: &dyn Reporter,
    ) -> Result<RunOutcome> {
        self.run(name, &["info"], working_copy, reporter, OutputMode::Buffer)
            .await
    }

    /// `<client> update`, run inside the working copy.
    pub async fn update(
        &self,
        name: &str,
        working_copy: &Path,
        reporter: &dyn Reporter,
        mode: OutputMode,
    ) -> Result<RunOutcome> {
        self.run(name, &["update"], working_copy, reporter, mode)
            .await
    }

    async fn run(
        &self,
        name: &str,
        args: &[&str],
        cwd: &Path,
        reporter: &dyn Reporter,
        mode: OutputMode,
    ) -> Result<RunOutcome> {
        debug!(
            "run: {} {} (cwd={}) for '{}'",
            self.program,
            args.join(" "),
            cwd.display(),
            name
        );

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| NtsError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let collect_stdout = async {
            let mut collected = String::new();
            if let Some(stdout) = stdout {
                for_each_line(stdout, |line| match mode {
                    OutputMode::Quiet => {}
                    OutputMode::Stream => reporter.info(&format!("{}: {}", name, line)),
                    OutputMode::Buffer => {
                        collected.push_str(line);
                        collected.push('\n');
                    }
                })
                .await?;
            }
            Ok::<_, std::io::Error>(collected)
        };

        let watch_stderr = async {
            let mut count = 0usize;
            if let Some(stderr) = stderr {
                for_each_line(stderr, |line| {
                    count += 1;
                    reporter.error(&format!("{}: {}", name, line));
                })
                .await?;
            }
            Ok::<_, std::io::Error>(count)
        };

        // Reap the child before surfacing a read error so it never outlives us.
        let streams = tokio::try_join!(collect_stdout, watch_stderr);
        let status = child.wait().await?;
        let (stdout, stderr_lines) = streams?;

        let outcome = RunOutcome {
            exit_code: status.code(),
            stdout,
            stderr_lines,
        };

        if outcome.success() {
            info!("run: '{}' {} finished", name, args[0]);
        } else {
            warn!(
                "run: '{}' {} failed (exit={:?}, stderr lines={})",
                name, args[0], outcome.exit_code, outcome.stderr_lines
            );
        }

        Ok(outcome)
    }
}

/// Feed every line of `reader` to `f`, decoding lossily so a stray
/// non-UTF-8 byte from the client doesn't abort the read.
async fn for_each_line<R, F>(reader: R, mut f: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut segments = BufReader::new(reader).split(b'\n');
    while let Some(segment) = segments.next_segment().await? {
        let line = String::from_utf8_lossy(&segment);
        f(line.trim_end_matches('\r'));
    }
    Ok(())
}

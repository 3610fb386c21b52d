//! Helpers shared by the unit tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::client::Client;
use crate::context::Context;
use crate::reporter::MemoryReporter;

/// Write an executable `/bin/sh` script standing in for the real client.
///
/// The script is invoked once with `--warmup` before being handed out so a
/// freshly written file that is still briefly busy (ETXTBSY) doesn't fail
/// the test that uses it.
pub fn fake_client(dir: &Path, body: &str) -> Client {
    let path = fake_client_path(dir, body);
    Client::new(path.display().to_string())
}

pub fn fake_client_path(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-svn");
    let script = format!("#!/bin/sh\n[ \"$1\" = \"--warmup\" ] && exit 0\n{}", body);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    for _ in 0..100 {
        match std::process::Command::new(&path).arg("--warmup").status() {
            Ok(_) => break,
            Err(e) if e.raw_os_error() == Some(26) => std::thread::sleep(Duration::from_millis(10)),
            Err(e) => panic!("fake client failed to run: {}", e),
        }
    }

    path
}

/// A context rooted at `base_dir` whose reporter records every line.
pub fn memory_context(client: Client, base_dir: &Path, verbose: bool) -> (Context, Arc<MemoryReporter>) {
    let reporter = Arc::new(MemoryReporter::default());
    let ctx = Context::new(client, reporter.clone(), base_dir.to_path_buf(), verbose);
    (ctx, reporter)
}

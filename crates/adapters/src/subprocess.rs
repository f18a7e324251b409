// SPDX-License-Identifier: MIT

//! Subprocess execution helpers, used by plugin `prepare` steps that shell
//! out to `sysctl` (spec §4.4, `ecn` plugin's per-configuration toggle).

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for a plugin's `prepare`/sysctl shell-out.
pub const SYSCTL_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a subprocess command with a timeout, killing the child if it
/// elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}s",
            description,
            timeout.as_secs()
        )),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;

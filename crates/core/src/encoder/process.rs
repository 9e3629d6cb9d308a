//! Bounded child-process execution shared by the probe, executor and player.

use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Captured result of a child that exited within its bound.
#[derive(Debug)]
pub(crate) struct BoundedOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[derive(Debug)]
pub(crate) enum RunError {
    /// The process could not be started at all.
    Spawn(std::io::Error),
    /// The process outlived its bound and was killed.
    Timeout,
    /// Reading output or waiting failed after a successful spawn.
    Io(std::io::Error),
}

/// Runs `command` to completion, killing it if it exceeds `limit`.
pub(crate) async fn run_bounded(
    command: &mut Command,
    limit: Duration,
) -> Result<BoundedOutput, RunError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(RunError::Spawn)?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let result = timeout(limit, async {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let read_stdout = async {
            if let Some(pipe) = stdout_pipe.as_mut() {
                pipe.read_to_end(&mut stdout).await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let read_stderr = async {
            if let Some(pipe) = stderr_pipe.as_mut() {
                pipe.read_to_end(&mut stderr).await?;
            }
            Ok::<(), std::io::Error>(())
        };
        tokio::try_join!(read_stdout, read_stderr)?;

        let status = child.wait().await?;
        Ok::<BoundedOutput, std::io::Error>(BoundedOutput {
            status,
            stdout,
            stderr,
        })
    })
    .await;

    match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(RunError::Io(e)),
        Err(_) => {
            // Kill the process on timeout
            if let Err(e) = child.kill().await {
                debug!("Failed to kill timed out process: {}", e);
            }
            Err(RunError::Timeout)
        }
    }
}

// ============================================
// File: crates/tunkey-validator/src/process.rs
// ============================================
//! # Bounded Subprocess Runner
//!
//! ## Creation Reason
//! Runs an external program with piped stdio under a hard deadline,
//! without ever blocking on a full pipe.
//!
//! ## Main Logical Flow
//! ```text
//! spawn (own process group)
//!   ├─ task: drain stdout ─┐
//!   ├─ task: drain stderr ─┤
//!   ├─ write stdin, close  │
//!   └─ wait for exit ──────┴─ join ──┐
//!                                    ├─ race
//! deadline timer ────────────────────┘
//!   └─ wins: SIGKILL process group, reap child, abort drains
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - After a forced kill the child must not be touched again
//! - Input may contain a private key; it is never logged
//!
//! ## Last Modified
//! v0.1.0 - Initial runner

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::config::duration_ms;
use crate::error::{Result, ValidatorError};

// ============================================
// ProcessOutput
// ============================================

/// Everything a finished subprocess produced.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit status
    pub status: ExitStatus,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Standard error as trimmed lossy UTF-8.
    #[must_use]
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// First line of standard output, trimmed, if non-empty.
    #[must_use]
    pub fn first_line(&self) -> Option<String> {
        String::from_utf8_lossy(&self.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(ToString::to_string)
    }
}

// ============================================
// Runner
// ============================================

/// Runs `program args...`, feeds `input` to stdin and collects output.
///
/// # Errors
/// - `ToolUnavailable` if the program cannot be spawned
/// - `ToolTimeout` if it does not finish within `timeout` (it is killed)
/// - `Io` on pipe failures
pub async fn run_with_deadline(
    program: &str,
    args: &[String],
    input: &[u8],
    timeout: Duration,
) -> Result<ProcessOutput> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    isolate_process_group(&mut command);

    let mut child = command.spawn().map_err(|e| {
        debug!(tool = program, error = %e, "Failed to spawn reference tool");
        ValidatorError::unavailable(program)
    })?;
    let pid = child.id();
    debug!(tool = program, ?pid, "Spawned reference tool");

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| missing_pipe("stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| missing_pipe("stderr"))?;

    let mut stdout_task = tokio::spawn(drain(stdout));
    let mut stderr_task = tokio::spawn(drain(stderr));

    let outcome = tokio::time::timeout(timeout, async {
        feed_stdin(&mut child, input).await?;
        let (status, out, err) =
            tokio::join!(child.wait(), &mut stdout_task, &mut stderr_task);
        Ok::<_, io::Error>((status?, joined(out)?, joined(err)?))
    })
    .await;

    match outcome {
        Ok(Ok((status, stdout, stderr))) => {
            debug!(tool = program, ?status, "Reference tool finished");
            Ok(ProcessOutput {
                status,
                stdout,
                stderr,
            })
        }
        Ok(Err(e)) => {
            terminate(&mut child, pid, program).await;
            stdout_task.abort();
            stderr_task.abort();
            Err(ValidatorError::io("reference tool pipes", e))
        }
        Err(_) => {
            warn!(
                tool = program,
                timeout_ms = duration_ms(timeout),
                "Reference tool timed out, killing it"
            );
            terminate(&mut child, pid, program).await;
            stdout_task.abort();
            stderr_task.abort();
            Err(ValidatorError::timeout(program, duration_ms(timeout)))
        }
    }
}

fn missing_pipe(name: &str) -> ValidatorError {
    ValidatorError::io(
        format!("reference tool {name}"),
        io::Error::new(io::ErrorKind::BrokenPipe, "pipe not captured"),
    )
}

/// Writes `input` and closes stdin.
///
/// A tool that exits without reading its input is not an error here;
/// its exit status tells the story.
async fn feed_stdin(child: &mut Child, input: &[u8]) -> io::Result<()> {
    let Some(mut stdin) = child.stdin.take() else {
        return Ok(());
    };
    match stdin.write_all(input).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Reference tool closed stdin early");
        }
        Err(e) => return Err(e),
    }
    drop(stdin);
    Ok(())
}

async fn drain<R>(mut reader: R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

fn joined(
    result: std::result::Result<io::Result<Vec<u8>>, tokio::task::JoinError>,
) -> io::Result<Vec<u8>> {
    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

/// Kills the tool and everything it spawned, then reaps it.
///
/// `pid` is taken at spawn time: the leader may already be reaped while
/// its descendants still hold the pipes open.
async fn terminate(child: &mut Child, pid: Option<u32>, program: &str) {
    if let Some(pid) = pid {
        kill_process_group(pid, program);
    }
    if let Err(e) = child.kill().await {
        debug!(tool = program, error = %e, "Failed to kill reference tool");
    }
}

// ============================================
// Platform Process Groups
// ============================================

/// Puts the child in its own process group, so descendants die with it.
#[cfg(unix)]
fn isolate_process_group(command: &mut Command) {
    command.process_group(0);
}

#[cfg(not(unix))]
fn isolate_process_group(_command: &mut Command) {}

#[cfg(unix)]
fn kill_process_group(pid: u32, program: &str) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        debug!(tool = program, pid, error = %e, "killpg failed");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32, _program: &str) {}

// ============================================
// Tests
// ============================================

#[cfg(all(test, unix))]
mod tests {
    use std::time::Instant;

    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_both_streams() {
        let output = run_with_deadline(
            "sh",
            &sh("read line; echo \"got $line\"; echo oops >&2"),
            b"hello\n",
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert!(output.status.success());
        assert_eq!(output.first_line().as_deref(), Some("got hello"));
        assert_eq!(output.stderr_text(), "oops");
    }

    #[tokio::test]
    async fn test_large_output_does_not_deadlock() {
        // Far more than a pipe buffer on both streams
        let output = run_with_deadline(
            "sh",
            &sh("head -c 300000 /dev/zero; head -c 300000 /dev/zero >&2"),
            b"",
            Duration::from_secs(10),
        )
        .await
        .unwrap();

        assert_eq!(output.stdout.len(), 300_000);
        assert_eq!(output.stderr.len(), 300_000);
    }

    #[tokio::test]
    async fn test_exit_status_reported() {
        let output = run_with_deadline("sh", &sh("exit 7"), b"ignored\n", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output.status.code(), Some(7));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = run_with_deadline(
            "/nonexistent/tunkey-reference-tool",
            &[],
            b"",
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ValidatorError::ToolUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_process_tree() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("survived");
        let script = format!("sleep 2; touch '{}'", marker.display());

        let started = Instant::now();
        let err = run_with_deadline("sh", &sh(&script), b"", Duration::from_millis(300))
            .await
            .unwrap_err();

        assert!(matches!(err, ValidatorError::ToolTimeout { timeout_ms: 300, .. }));
        assert!(started.elapsed() < Duration::from_secs(2));

        // Had the shell (or its sleep) survived, the marker would appear
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!marker.exists());
    }
}

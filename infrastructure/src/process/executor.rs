//! GAM process executor — the concrete implementation of [`ProcessExecutorPort`].
//!
//! Spawns the command vector as literal argv via [`tokio::process::Command`]:
//! no shell sits between the vector and the OS. The child runs with a
//! cleared environment plus a small allow-list (`PATH`, `HOME`, ...) and any
//! explicitly configured variables such as `GAMCFGDIR`.
//!
//! Both output streams are read concurrently and capped at the configured
//! byte ceiling. Past the cap the stream keeps being drained and discarded,
//! so a verbose child is never blocked on a full pipe; the truncation flag
//! records that the cap was hit.
//!
//! Termination is always definite: normal exit, kill on timeout, kill on
//! cancellation, or a start failure carrying the OS error. Partial output
//! captured before a kill survives into the result.

use async_trait::async_trait;
use gam_application::{ExecutionLimits, ProcessExecutorPort};
use gam_domain::{CommandVector, ExecutionResult, ExitStatus};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Environment variables the child inherits from this process.
const INHERITED_ENV: &[&str] = &["PATH", "HOME", "USER", "LANG", "TMPDIR"];

/// How long to keep draining output after a kill. A killed child's
/// grandchildren can hold the pipes open indefinitely; past this window the
/// readers are abandoned and whatever was captured stands.
const KILL_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Executor that runs GAM on the local machine.
#[derive(Debug, Clone, Default)]
pub struct GamProcessExecutor {
    /// Extra variables exported to the child (e.g. `GAMCFGDIR`)
    extra_env: Vec<(String, String)>,
}

impl GamProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export an additional environment variable to every spawned child.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_env.push((key.into(), value.into()));
        self
    }
}

/// Capture buffer shared between a reader task and the executor, so partial
/// output survives even when the reader is abandoned after a kill.
type Capture = Arc<Mutex<(Vec<u8>, bool)>>;

/// Read a stream to EOF, capturing at most `cap` bytes into `sink`.
///
/// The second sink field records whether anything beyond the cap was
/// discarded. Output of exactly `cap` bytes is not flagged as truncated.
async fn read_capped<R: AsyncRead + Unpin>(mut reader: R, cap: usize, sink: Capture) {
    let mut buf = [0u8; 8192];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let Ok(mut guard) = sink.lock() else { break };
                let (captured, truncated) = &mut *guard;
                if captured.len() >= cap {
                    // Past the ceiling: keep draining so the child never
                    // blocks on a full pipe.
                    *truncated = true;
                    continue;
                }
                let take = n.min(cap - captured.len());
                captured.extend_from_slice(&buf[..take]);
                if take < n {
                    *truncated = true;
                }
            }
            Err(_) => break,
        }
    }
}

fn take_capture(sink: &Capture) -> (Vec<u8>, bool) {
    sink.lock()
        .map(|mut guard| (std::mem::take(&mut guard.0), guard.1))
        .unwrap_or_default()
}

#[async_trait]
impl ProcessExecutorPort for GamProcessExecutor {
    async fn execute(
        &self,
        command: &CommandVector,
        limits: ExecutionLimits,
        cancel: &CancellationToken,
    ) -> ExecutionResult {
        let start = Instant::now();

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .env_clear();
        for key in INHERITED_ENV {
            if let Ok(value) = std::env::var(key) {
                cmd.env(key, value);
            }
        }
        for (key, value) in &self.extra_env {
            cmd.env(key, value);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(program = command.program(), error = %e, "Failed to start process");
                return ExecutionResult::start_failed(e.to_string());
            }
        };

        let cap = limits.output_cap_bytes;
        let stdout_sink: Capture = Arc::default();
        let stderr_sink: Capture = Arc::default();

        let stdout_pipe = child.stdout.take();
        let sink = Arc::clone(&stdout_sink);
        let stdout_task = tokio::spawn(async move {
            if let Some(stream) = stdout_pipe {
                read_capped(stream, cap, sink).await;
            }
        });
        let stderr_pipe = child.stderr.take();
        let sink = Arc::clone(&stderr_sink);
        let stderr_task = tokio::spawn(async move {
            if let Some(stream) = stderr_pipe {
                read_capped(stream, cap, sink).await;
            }
        });

        let status = tokio::select! {
            exit = child.wait() => match exit {
                Ok(status) => ExitStatus::Exited(status.code().unwrap_or(-1)),
                Err(e) => {
                    warn!(error = %e, "Failed to wait for process");
                    ExitStatus::Exited(-1)
                }
            },
            _ = tokio::time::sleep(limits.timeout) => {
                debug!(timeout = ?limits.timeout, "Process exceeded timeout, killing");
                let _ = child.start_kill();
                let _ = child.wait().await;
                ExitStatus::TimedOut
            }
            _ = cancel.cancelled() => {
                debug!("Call cancelled, killing process");
                let _ = child.start_kill();
                let _ = child.wait().await;
                ExitStatus::Cancelled
            }
        };

        if matches!(status, ExitStatus::Exited(_)) {
            // Normal exit: the pipes close, so the readers reach EOF.
            let _ = stdout_task.await;
            let _ = stderr_task.await;
        } else {
            // A killed child's grandchildren may keep the pipes open; drain
            // briefly, then abandon the readers and keep the partial output.
            let drain = async {
                let _ = stdout_task.await;
                let _ = stderr_task.await;
            };
            if tokio::time::timeout(KILL_DRAIN_GRACE, drain).await.is_err() {
                debug!("Abandoning output readers after kill");
            }
        }

        let (stdout, stdout_truncated) = take_capture(&stdout_sink);
        let (stderr, stderr_truncated) = take_capture(&stderr_sink);

        ExecutionResult {
            status,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            duration: start.elapsed(),
            stdout_truncated,
            stderr_truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn limits(timeout_ms: u64, cap: usize) -> ExecutionLimits {
        ExecutionLimits {
            timeout: Duration::from_millis(timeout_ms),
            output_cap_bytes: cap,
        }
    }

    fn sh(script: &str) -> CommandVector {
        CommandVector::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let executor = GamProcessExecutor::new();
        let vector = CommandVector::new("echo", vec!["hello".to_string()]);

        let result = executor
            .execute(&vector, limits(5000, 1024), &CancellationToken::new())
            .await;

        assert_eq!(result.status, ExitStatus::Exited(0));
        assert_eq!(result.stdout, "hello\n");
        assert!(!result.truncated());
    }

    #[tokio::test]
    async fn test_nonzero_exit_with_stderr() {
        let executor = GamProcessExecutor::new();
        let result = executor
            .execute(
                &sh("echo oops >&2; exit 3"),
                limits(5000, 1024),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(result.status, ExitStatus::Exited(3));
        assert_eq!(result.stderr, "oops\n");
        assert!(result.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_start_failure() {
        let executor = GamProcessExecutor::new();
        let vector = CommandVector::new("definitely-not-a-real-binary-a1b2c3", vec![]);

        let result = executor
            .execute(&vector, limits(5000, 1024), &CancellationToken::new())
            .await;

        assert_eq!(result.status, ExitStatus::StartFailed);
        assert!(!result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_kills_and_keeps_partial_output() {
        let executor = GamProcessExecutor::new();
        let started = Instant::now();

        let result = executor
            .execute(
                &sh("echo partial; sleep 30"),
                limits(300, 1024),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(result.status, ExitStatus::TimedOut);
        assert_eq!(result.stdout, "partial\n");
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_output_capped_exactly_at_ceiling() {
        let executor = GamProcessExecutor::new();
        let result = executor
            .execute(
                &sh("head -c 4096 /dev/zero | tr '\\0' 'x'"),
                limits(5000, 1024),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(result.status, ExitStatus::Exited(0));
        assert!(result.stdout_truncated);
        assert_eq!(result.stdout.len(), 1024);
    }

    #[tokio::test]
    async fn test_output_exactly_cap_is_not_truncated() {
        let executor = GamProcessExecutor::new();
        let result = executor
            .execute(
                &sh("printf 'abcd'"),
                limits(5000, 4),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(result.stdout, "abcd");
        assert!(!result.stdout_truncated);
    }

    #[tokio::test]
    async fn test_cancellation_kills_process() {
        let executor = GamProcessExecutor::new();
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let result = executor
            .execute(&sh("sleep 30"), limits(60_000, 1024), &cancel)
            .await;

        assert_eq!(result.status, ExitStatus::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_extra_env_is_exported() {
        let executor = GamProcessExecutor::new().with_env("GAMCFGDIR", "/tmp/gamcfg");
        let result = executor
            .execute(
                &sh("printf '%s' \"$GAMCFGDIR\""),
                limits(5000, 1024),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(result.stdout, "/tmp/gamcfg");
    }

    #[tokio::test]
    async fn test_argv_is_literal_no_shell() {
        let executor = GamProcessExecutor::new();
        // `;` handed as an argv element must reach echo as text, not split
        // the command.
        let vector = CommandVector::new(
            "echo",
            vec!["a".to_string(), ";".to_string(), "id".to_string()],
        );

        let result = executor
            .execute(&vector, limits(5000, 1024), &CancellationToken::new())
            .await;

        assert_eq!(result.stdout, "a ; id\n");
    }
}

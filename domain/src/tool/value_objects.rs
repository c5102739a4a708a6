//! Tool domain value objects — immutable execution outcomes
//!
//! [`ExecutionResult`] is produced by the process executor and carries the
//! full outcome of one external command: how the process ended, both output
//! streams (capped), and timing. It is never left pending — every variant of
//! [`ExitStatus`] is a definite terminal state.
//!
//! [`ToolResponse`] is the caller-facing rendering the dispatcher produces
//! from an `ExecutionResult`. A non-zero exit is reported there as
//! `is_error = true`, not raised as a fault, so the calling agent can read
//! the failure text and react.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How an external process run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "code")]
pub enum ExitStatus {
    /// Process exited on its own with this code
    Exited(i32),
    /// Process was killed after exceeding the timeout
    TimedOut,
    /// The executable could not be located or started
    StartFailed,
    /// The caller's context was cancelled mid-flight and the process killed
    Cancelled,
}

impl ExitStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitStatus::Exited(0))
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitStatus::Exited(code) => write!(f, "exit code {}", code),
            ExitStatus::TimedOut => write!(f, "timed out"),
            ExitStatus::StartFailed => write!(f, "failed to start"),
            ExitStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of running a command vector.
///
/// Output streams are captured independently, each capped at the executor's
/// byte ceiling; `stdout_truncated` / `stderr_truncated` record whether the
/// cap was hit. Partial output survives timeouts and cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Terminal status of the process
    pub status: ExitStatus,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Wall-clock duration of the run
    pub duration: Duration,
    /// Standard output hit the byte ceiling
    pub stdout_truncated: bool,
    /// Standard error hit the byte ceiling
    pub stderr_truncated: bool,
}

impl ExecutionResult {
    /// Result for a process that exited normally.
    pub fn exited(code: i32, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            status: ExitStatus::Exited(code),
            stdout,
            stderr,
            duration,
            stdout_truncated: false,
            stderr_truncated: false,
        }
    }

    /// Result for an executable that could not be started.
    pub fn start_failed(os_error: impl Into<String>) -> Self {
        Self {
            status: ExitStatus::StartFailed,
            stdout: String::new(),
            stderr: os_error.into(),
            duration: Duration::ZERO,
            stdout_truncated: false,
            stderr_truncated: false,
        }
    }

    pub fn with_truncation(mut self, stdout_truncated: bool, stderr_truncated: bool) -> Self {
        self.stdout_truncated = stdout_truncated;
        self.stderr_truncated = stderr_truncated;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Either stream hit the byte ceiling.
    pub fn truncated(&self) -> bool {
        self.stdout_truncated || self.stderr_truncated
    }
}

/// Caller-facing result of a dispatched tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Structured text combining exit status, stdout, and stderr
    pub text: String,
    /// Whether the underlying command failed (non-zero exit, timeout,
    /// start failure, or cancellation)
    pub is_error: bool,
}

impl ToolResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Render an [`ExecutionResult`] into the text the calling agent sees.
    ///
    /// Success passes stdout through verbatim. Failures lead with a status
    /// line, then whatever partial output was captured — never discarded.
    pub fn from_execution(result: &ExecutionResult) -> Self {
        if result.is_success() {
            let mut text = if result.stdout.is_empty() {
                "Command completed successfully (no output).".to_string()
            } else {
                result.stdout.clone()
            };
            if result.stdout_truncated {
                text.push_str("\n... (output truncated)");
            }
            Self::ok(text)
        } else {
            let mut text = format!("Command failed ({})", result.status);
            if !result.stdout.is_empty() {
                text.push('\n');
                text.push_str(&result.stdout);
                if result.stdout_truncated {
                    text.push_str("\n... (output truncated)");
                }
            }
            if !result.stderr.is_empty() {
                text.push_str("\n--- stderr ---\n");
                text.push_str(&result.stderr);
                if result.stderr_truncated {
                    text.push_str("\n... (output truncated)");
                }
            }
            Self::error(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_success() {
        assert!(ExitStatus::Exited(0).is_success());
        assert!(!ExitStatus::Exited(1).is_success());
        assert!(!ExitStatus::TimedOut.is_success());
        assert!(!ExitStatus::StartFailed.is_success());
        assert!(!ExitStatus::Cancelled.is_success());
    }

    #[test]
    fn test_response_passes_stdout_through() {
        let result = ExecutionResult::exited(
            0,
            "alice@example.com\nbob@example.com\n".to_string(),
            String::new(),
            Duration::from_millis(12),
        );
        let response = ToolResponse::from_execution(&result);

        assert!(!response.is_error);
        assert_eq!(response.text, "alice@example.com\nbob@example.com\n");
    }

    #[test]
    fn test_response_empty_stdout() {
        let result =
            ExecutionResult::exited(0, String::new(), String::new(), Duration::from_millis(1));
        let response = ToolResponse::from_execution(&result);

        assert!(!response.is_error);
        assert!(response.text.contains("no output"));
    }

    #[test]
    fn test_response_nonzero_exit_keeps_partial_output() {
        let result = ExecutionResult::exited(
            3,
            "partial".to_string(),
            "ERROR: user not found".to_string(),
            Duration::from_millis(40),
        );
        let response = ToolResponse::from_execution(&result);

        assert!(response.is_error);
        assert!(response.text.contains("exit code 3"));
        assert!(response.text.contains("partial"));
        assert!(response.text.contains("ERROR: user not found"));
    }

    #[test]
    fn test_response_timeout() {
        let result = ExecutionResult {
            status: ExitStatus::TimedOut,
            stdout: "partial output".to_string(),
            stderr: String::new(),
            duration: Duration::from_secs(300),
            stdout_truncated: false,
            stderr_truncated: false,
        };
        let response = ToolResponse::from_execution(&result);

        assert!(response.is_error);
        assert!(response.text.contains("timed out"));
        assert!(response.text.contains("partial output"));
    }

    #[test]
    fn test_response_marks_truncation() {
        let result = ExecutionResult::exited(
            0,
            "x".repeat(16),
            String::new(),
            Duration::from_millis(5),
        )
        .with_truncation(true, false);
        let response = ToolResponse::from_execution(&result);

        assert!(response.text.ends_with("... (output truncated)"));
    }

    #[test]
    fn test_start_failed_carries_os_error() {
        let result = ExecutionResult::start_failed("No such file or directory (os error 2)");
        assert_eq!(result.status, ExitStatus::StartFailed);
        assert!(result.stderr.contains("os error 2"));
        assert!(ToolResponse::from_execution(&result).is_error);
    }
}

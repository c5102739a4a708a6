//! Process Executor port
//!
//! Defines the interface for running a built command vector as an external
//! process. This is the single suspension point in the system: validation
//! and formatting never block, only execution does.

use async_trait::async_trait;
use gam_domain::{CommandVector, ExecutionResult};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Resource bounds for one process run.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionLimits {
    /// Wall-clock limit; the process is killed when exceeded
    pub timeout: Duration,
    /// Per-stream capture ceiling in bytes; output past it is discarded
    /// and the truncation flag set
    pub output_cap_bytes: usize,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            output_cap_bytes: 1024 * 1024,
        }
    }
}

/// Port for external process execution
///
/// Implementations (adapters) live in the infrastructure layer. The
/// contract: the vector is spawned as literal argv with no shell layer,
/// the result always carries a definite terminal status, and a fired
/// `cancel` token kills the child rather than leaking it.
#[async_trait]
pub trait ProcessExecutorPort: Send + Sync {
    /// Run the command to completion, timeout, or cancellation.
    async fn execute(
        &self,
        command: &CommandVector,
        limits: ExecutionLimits,
        cancel: &CancellationToken,
    ) -> ExecutionResult;
}

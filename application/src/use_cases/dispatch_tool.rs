//! Tool dispatch use case
//!
//! [`ToolDispatcher`] is the per-call pipeline behind the protocol surface:
//!
//! ```text
//! Received → Resolved → Validated → Executed → Formatted
//! ```
//!
//! - **Resolved**: look the name up in the static [`ToolSpec`]; unknown
//!   names terminate with [`DispatchError::ToolNotFound`].
//! - **Validated**: destructive tools demand a `confirm: true` argument;
//!   then the command builder checks the schema and produces the argv
//!   vector. Any failure here terminates before a process exists.
//! - **Executed**: the one suspension point — the executor port runs the
//!   vector under the per-tool timeout (or the configured default).
//! - **Formatted**: the [`ExecutionResult`] becomes a [`ToolResponse`].
//!   A failed command is a normal response with `is_error = true`, never a
//!   protocol fault, so the calling agent sees the failure text and can
//!   decide what to do. No retries happen here — this layer cannot know
//!   which operations are idempotent.
//!
//! Concurrent dispatches share only the immutable spec and the executor
//! handle; each call owns its vector and result for its whole lifecycle.

use gam_domain::{ToolCall, ToolResponse, ToolSpec, ValidationError, build_command};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::ports::invocation_logger::{InvocationLogger, InvocationRecord, NoInvocationLogger};
use crate::ports::process_executor::{ExecutionLimits, ProcessExecutorPort};

/// Reserved argument gating destructive tools. Stripped before command
/// building; never becomes an argv token.
pub const CONFIRM_PARAM: &str = "confirm";

/// Redacted from audit records.
const REDACTED_PARAMS: &[&str] = &["password"];

/// Errors that prevent a call from being dispatched at all.
///
/// These are protocol-level faults, distinct from "the command ran and
/// failed" (which is reported inside a [`ToolResponse`]). None of them
/// spawns a process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Tool '{name}' is destructive and requires `confirm: true`")]
    ConfirmationRequired { name: String },
}

/// Process-wide execution settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Path to the GAM executable
    pub gam_path: String,
    /// Timeout applied when the tool declares no override
    pub default_timeout: Duration,
    /// Per-stream output capture ceiling
    pub output_cap_bytes: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            gam_path: "gam".to_string(),
            default_timeout: Duration::from_secs(300),
            output_cap_bytes: 1024 * 1024,
        }
    }
}

/// Resolves, validates, executes, and formats tool calls.
pub struct ToolDispatcher {
    spec: ToolSpec,
    executor: Arc<dyn ProcessExecutorPort>,
    audit: Arc<dyn InvocationLogger>,
    config: DispatchConfig,
}

impl ToolDispatcher {
    pub fn new(
        spec: ToolSpec,
        executor: Arc<dyn ProcessExecutorPort>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            spec,
            executor,
            audit: Arc::new(NoInvocationLogger),
            config,
        }
    }

    /// Attach an audit logger for executed invocations.
    pub fn with_invocation_logger(mut self, audit: Arc<dyn InvocationLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// The static registry this dispatcher serves.
    pub fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Run one call through the full pipeline.
    ///
    /// `cancel` is observed only during execution; the synchronous
    /// validation stages do no I/O and cannot be interrupted.
    pub async fn dispatch(
        &self,
        mut call: ToolCall,
        cancel: &CancellationToken,
    ) -> Result<ToolResponse, DispatchError> {
        let definition = self
            .spec
            .get(&call.tool_name)
            .ok_or_else(|| DispatchError::ToolNotFound {
                name: call.tool_name.clone(),
            })?;

        // `confirm` is a dispatch concern, not a command parameter. Strip it
        // unconditionally so cautious clients confirming a non-destructive
        // tool do not trip the unknown-parameter check.
        let confirmed = call
            .take_arg(CONFIRM_PARAM)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if definition.is_destructive() && !confirmed {
            return Err(DispatchError::ConfirmationRequired {
                name: definition.name.clone(),
            });
        }

        let vector = build_command(definition, &call, &self.config.gam_path)?;

        let limits = ExecutionLimits {
            timeout: definition
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(self.config.default_timeout),
            output_cap_bytes: self.config.output_cap_bytes,
        };

        debug!(tool = %definition.name, command = %vector, "Executing GAM command");
        let result = self.executor.execute(&vector, limits, cancel).await;

        if !result.is_success() {
            warn!(
                tool = %definition.name,
                status = %result.status,
                "GAM command did not succeed"
            );
        }

        self.audit.log(InvocationRecord {
            tool_name: definition.name.clone(),
            risk_level: definition.risk_level,
            arguments: redact_arguments(&call.arguments),
            status: result.status,
            duration_ms: result.duration.as_millis() as u64,
            stdout_bytes: result.stdout.len(),
            stderr_bytes: result.stderr.len(),
        });

        Ok(ToolResponse::from_execution(&result))
    }
}

fn redact_arguments(
    arguments: &HashMap<String, serde_json::Value>,
) -> HashMap<String, serde_json::Value> {
    arguments
        .iter()
        .map(|(k, v)| {
            if REDACTED_PARAMS.contains(&k.as_str()) {
                (k.clone(), serde_json::json!("<redacted>"))
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}

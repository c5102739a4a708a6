//! Invocation Logger port
//!
//! Optional audit trail of dispatched tool calls. The dispatcher records one
//! [`InvocationRecord`] per executed call; adapters decide where it goes
//! (JSONL file, nothing at all).

use gam_domain::{ExitStatus, RiskLevel};
use serde::Serialize;
use std::collections::HashMap;

/// One executed tool call, as seen by the audit trail.
///
/// Arguments are recorded as supplied, except `password`, which is redacted
/// before the record is built.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationRecord {
    pub tool_name: String,
    pub risk_level: RiskLevel,
    pub arguments: HashMap<String, serde_json::Value>,
    pub status: ExitStatus,
    pub duration_ms: u64,
    pub stdout_bytes: usize,
    pub stderr_bytes: usize,
}

/// Port for recording executed invocations
pub trait InvocationLogger: Send + Sync {
    fn log(&self, record: InvocationRecord);
}

/// No-op logger used when auditing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _record: InvocationRecord) {}
}

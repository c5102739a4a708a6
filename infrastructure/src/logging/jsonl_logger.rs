//! JSONL file writer for the invocation audit trail.
//!
//! Each [`InvocationRecord`] is serialized as a single JSON line with a
//! `timestamp`, appended to the file via a buffered writer. The log is
//! append-only so successive server runs accumulate in one file.

use gam_application::{InvocationLogger, InvocationRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Audit logger that writes one JSON object per executed tool call.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after each record and
/// on `Drop`.
pub struct JsonlInvocationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInvocationLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationLogger for JsonlInvocationLogger {
    fn log(&self, record: InvocationRecord) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let Ok(serde_json::Value::Object(mut map)) = serde_json::to_value(&record) else {
            return;
        };
        map.insert(
            "timestamp".to_string(),
            serde_json::Value::String(timestamp),
        );

        let Ok(line) = serde_json::to_string(&serde_json::Value::Object(map)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlInvocationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gam_domain::{ExitStatus, RiskLevel};
    use std::collections::HashMap;

    fn record(tool: &str, status: ExitStatus) -> InvocationRecord {
        InvocationRecord {
            tool_name: tool.to_string(),
            risk_level: RiskLevel::ReadOnly,
            arguments: HashMap::new(),
            status,
            duration_ms: 42,
            stdout_bytes: 10,
            stderr_bytes: 0,
        }
    }

    #[test]
    fn test_writes_valid_jsonl_with_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        logger.log(record("list_users", ExitStatus::Exited(0)));
        logger.log(record("list_groups", ExitStatus::TimedOut));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tool_name"], "list_users");
        assert_eq!(first["duration_ms"], 42);
        assert!(first["timestamp"].is_string());
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let logger = JsonlInvocationLogger::new(&path).unwrap();
            logger.log(record("run_gam", ExitStatus::Exited(0)));
        }
        {
            let logger = JsonlInvocationLogger::new(&path).unwrap();
            logger.log(record("run_gam", ExitStatus::Exited(1)));
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("deep").join("audit.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();
        logger.log(record("get_user_info", ExitStatus::Exited(0)));
        assert!(path.exists());
    }
}

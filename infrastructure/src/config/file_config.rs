//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; defaults apply per-field.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("gam.timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("gam.output_cap_bytes cannot be 0")]
    InvalidOutputCap,
}

/// `[gam]` section: how the GAM binary is located and run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGamConfig {
    /// Path to the gam binary. Defaults to `gam` resolved via PATH.
    pub binary_path: String,
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
    /// Per-stream output ceiling in bytes.
    pub output_cap_bytes: usize,
    /// If set, exported to the child as GAMCFGDIR.
    pub config_dir: Option<PathBuf>,
}

impl Default for FileGamConfig {
    fn default() -> Self {
        Self {
            binary_path: "gam".to_string(),
            timeout_secs: 300,
            output_cap_bytes: 1024 * 1024,
            config_dir: None,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path to the JSONL audit log. Auditing is off when unset.
    pub audit_path: Option<PathBuf>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gam: FileGamConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gam.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.gam.output_cap_bytes == 0 {
            return Err(ConfigValidationError::InvalidOutputCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.gam.binary_path, "gam");
        assert_eq!(config.gam.timeout_secs, 300);
        assert_eq!(config.gam.output_cap_bytes, 1024 * 1024);
        assert!(config.gam.config_dir.is_none());
        assert!(config.logging.audit_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = FileConfig::default();
        config.gam.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [gam]
            binary_path = "/opt/gam7/gam"
            "#,
        )
        .unwrap();

        assert_eq!(config.gam.binary_path, "/opt/gam7/gam");
        assert_eq!(config.gam.timeout_secs, 300);
    }
}

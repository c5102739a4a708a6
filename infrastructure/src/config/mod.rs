//! Configuration loading and TOML schema

pub mod file_config;
pub mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileGamConfig, FileLoggingConfig};
pub use loader::ConfigLoader;

//! Infrastructure layer for gam-mcp
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the GAM process executor, the tool catalog, the MCP
//! stdio transport, configuration file loading, and the audit log writer.

pub mod config;
pub mod logging;
pub mod mcp;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileGamConfig, FileLoggingConfig};
pub use logging::JsonlInvocationLogger;
pub use mcp::McpServer;
pub use process::GamProcessExecutor;
pub use tools::{default_tool_spec, schema::all_tools_schema};

//! Domain layer for gam-mcp
//!
//! This crate contains the core types and pure logic: the tool model,
//! command-vector construction, and execution-result value objects.
//! It performs no I/O and has no dependency on infrastructure concerns.
//!
//! # Core Concepts
//!
//! Every Google Workspace operation is a **tool**: a named schema mapped to
//! a fixed GAM subcommand template. A call is validated against the schema,
//! rendered into a [`CommandVector`] of literal argv tokens, and handed to a
//! process executor. The outcome comes back as an [`ExecutionResult`] with a
//! definite terminal status — there is no pending state.

pub mod command;
pub mod core;
pub mod tool;

// Re-export commonly used types
pub use crate::command::{builder::build_command, vector::CommandVector};
pub use crate::core::error::ValidationError;
pub use crate::tool::{
    entities::{ArgStyle, ParamKind, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    value_objects::{ExecutionResult, ExitStatus, ToolResponse},
};

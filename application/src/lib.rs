//! Application layer for gam-mcp
//!
//! This crate defines the ports the infrastructure implements and the
//! dispatch use case that carries a tool call from resolution through
//! execution to a formatted response.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::invocation_logger::{InvocationLogger, InvocationRecord, NoInvocationLogger};
pub use ports::process_executor::{ExecutionLimits, ProcessExecutorPort};
pub use use_cases::dispatch_tool::{
    CONFIRM_PARAM, DispatchConfig, DispatchError, ToolDispatcher,
};

//! Ports — interfaces implemented by infrastructure adapters

pub mod invocation_logger;
pub mod process_executor;

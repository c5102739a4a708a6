//! Use cases — the application's operations

pub mod dispatch_tool;

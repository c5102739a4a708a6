//! Tool domain model
//!
//! Entities describe what a tool *is* (schema, risk level, invocation
//! template); value objects describe what happened when one ran.

pub mod entities;
pub mod value_objects;

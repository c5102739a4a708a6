//! Command construction
//!
//! The safe path from a tool call to an argv vector: validation and token
//! emission in [`builder`], the resulting [`CommandVector`](vector::CommandVector)
//! in [`vector`].

pub mod builder;
pub mod vector;

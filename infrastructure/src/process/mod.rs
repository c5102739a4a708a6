//! Process execution adapters

pub mod executor;

pub use executor::GamProcessExecutor;

//! Shared test infrastructure.

/// Fluent builders for test inputs.
pub mod builder;

/// Simulator harness and reference interpreter.
pub mod harness;

//! Core processor implementation.
//!
//! This module contains the out-of-order pipeline and the functional units it
//! issues to.

/// Instruction pipeline implementation (structures, stages, recovery, engine).
pub mod pipeline;

/// Execution units and opcode semantics.
pub mod units;

pub use self::pipeline::engine::Pipeline;

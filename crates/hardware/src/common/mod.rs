//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Architectural register count and reset values.
//! 2. **Error Handling:** Structural hazards, instruction exceptions, and fatal consistency errors.
//! 3. **Register Management:** The committed architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and exception causes.
pub mod error;

/// Architectural register file implementation.
pub mod reg;

pub use constants::{DEFAULT_EXCEPTION_PC, NUM_ARCH_REGS};
pub use error::{
    ConfigError, ConsistencyViolation, ExceptionCause, ProgramError, SimError, StructuralHazard,
};
pub use reg::RegisterFile;

//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator.

/// Number of architectural integer registers (`x0`-`x31`).
pub const NUM_ARCH_REGS: usize = 32;

/// Program counter Fetch is redirected to after a precise exception.
pub const DEFAULT_EXCEPTION_PC: u64 = 0x10000;

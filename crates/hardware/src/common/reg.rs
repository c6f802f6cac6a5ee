//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct, the committed view of the
//! 32 architectural registers. It provides:
//! 1. **Storage:** Committed 64-bit values, written only at commit time.
//! 2. **Observability:** Debugging utilities for dumping register state during simulation.
//!
//! In-flight values never land here; they travel on the broadcast bus and in
//! the issue queue until their producer commits.

use std::fmt;

use super::constants::NUM_ARCH_REGS;

/// Committed architectural register file.
///
/// Unlike RISC-V, `x0` is an ordinary writable register in this core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_ARCH_REGS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_ARCH_REGS],
        }
    }

    /// Returns `true` if `idx` names an architectural register.
    #[inline]
    pub const fn contains(idx: usize) -> bool {
        idx < NUM_ARCH_REGS
    }

    /// Reads a committed register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Out-of-range indices read as 0.
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a committed register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to out-of-range indices are ignored.
    /// * `val` - The 64-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns all committed values, indexed by register number.
    pub fn values(&self) -> &[u64] {
        &self.regs
    }
}

impl fmt::Display for RegisterFile {
    /// Formats registers in pairs with hexadecimal values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.regs.chunks(2).enumerate() {
            let base = row * 2;
            for (offset, value) in values.iter().enumerate() {
                write!(f, "x{:<2}={:#018x} ", base + offset, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

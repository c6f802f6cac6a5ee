//! MIPS R10000-style out-of-order core simulator library.
//!
//! This crate reproduces, cycle for cycle, the internal state of an
//! out-of-order integer core with the following:
//! 1. **Core:** Fetch, rename/dispatch, issue, execute, broadcast and in-order commit.
//! 2. **Renaming:** A producer-tag map table over the architectural register file.
//! 3. **Recovery:** Precise exceptions that roll the active list back youngest-first.
//! 4. **ISA:** The integer subset (`add`, `addi`, `sub`, `mulu`, `divu`, `remu`) and its text format.
//! 5. **Simulation:** Driver, per-cycle snapshots, program loading, and statistics.

/// Common types and constants (register file, errors).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// Out-of-order core (pipeline structures, stages, functional units).
pub mod core;
/// Instruction set (opcodes, instructions, program parsing).
pub mod isa;
/// Simulation driver, snapshots, and program loader.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level error type returned by the driver.
pub use crate::common::error::SimError;
/// Decoded program consumed by the simulator.
pub use crate::isa::Program;
/// Cycle-stepping driver; construct with `Simulator::new`.
pub use crate::sim::simulator::{Simulator, Termination};
/// Per-cycle structural snapshot.
pub use crate::sim::snapshot::Snapshot;

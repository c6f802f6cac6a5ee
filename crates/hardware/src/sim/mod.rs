//! Simulation driver, snapshots and program loading.
//!
//! Provides the cycle-stepping `Simulator`, the serializable per-cycle
//! `Snapshot`, and file loaders for programs and configurations.

/// Program and configuration file loading.
pub mod loader;

/// Cycle-stepping driver.
pub mod simulator;

/// Per-cycle structural snapshots.
pub mod snapshot;

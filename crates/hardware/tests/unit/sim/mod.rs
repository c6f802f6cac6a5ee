/// Program and configuration file loading.
pub mod loader;

/// Driver lifecycle: termination, idempotence and faults.
pub mod simulator;

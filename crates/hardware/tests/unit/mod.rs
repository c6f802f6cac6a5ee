//! # Unit Components
//!
//! Organizes the tests by the crate module they exercise.

/// Configuration parsing, defaults and validation.
pub mod config;



/// Simulator driver and program loading.
pub mod sim;

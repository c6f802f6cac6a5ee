//! Program and Configuration Loading.
//!
//! This module reads simulator inputs from disk. It performs:
//! 1. **Program loading:** Reads a JSON instruction-stream file and decodes it.
//! 2. **Config loading:** Reads a JSON configuration file, filling in defaults and validating it.

use std::fs;
use std::path::Path;

use crate::common::error::{ConfigError, ProgramError};
use crate::config::Config;
use crate::isa::Program;

/// Loads and decodes a JSON program file.
///
/// # Arguments
///
/// * `path` - Path to a JSON array of instruction strings.
///
/// # Returns
///
/// The decoded program, PC-indexed from zero.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, ProgramError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| ProgramError::Io(format!("{}: {e}", path.display())))?;
    Program::parse_json(&text)
}

/// Loads and validates a JSON configuration file.
///
/// Missing fields take their default values.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
    Config::from_json(&text)
}

//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline core parameters (widths, capacities, latencies).
//! 2. **Structures:** Hierarchical config for general and pipeline settings.
//! 3. **Validation:** Rejection of degenerate values before a core is built.
//!
//! Configuration is supplied via JSON (`Config::from_json`) or `Config::default()`.

use serde::Deserialize;

use crate::common::constants::DEFAULT_EXCEPTION_PC;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values describe the reference four-wide core when not explicitly
/// overridden in a configuration document.
mod defaults {
    /// Safety limit on simulated cycles for `run_to_completion`.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Instructions fetched per cycle.
    pub const FETCH_WIDTH: usize = 4;

    /// Capacity of the fetched-but-not-dispatched instruction buffer.
    pub const DECODE_BUFFER_SIZE: usize = 4;

    /// Instructions renamed and dispatched per cycle.
    pub const DISPATCH_WIDTH: usize = 4;

    /// Instructions retired per cycle.
    pub const COMMIT_WIDTH: usize = 4;

    /// Active list (reorder buffer) capacity; also the number of distinct tags.
    pub const ACTIVE_LIST_SIZE: usize = 32;

    /// Issue queue capacity.
    pub const ISSUE_QUEUE_SIZE: usize = 32;

    /// Number of single-cycle ALU units.
    pub const ALU_UNITS: usize = 1;

    /// ALU latency in cycles.
    pub const ALU_LATENCY: u64 = 1;

    /// Number of multiply/divide units.
    pub const MULDIV_UNITS: usize = 1;

    /// Multiply/divide latency in cycles.
    pub const MULDIV_LATENCY: u64 = 3;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use r10k_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.active_list_size, 32);
/// assert_eq!(config.general.exception_handler_pc, 0x10000);
/// ```
///
/// Deserializing a partial document; missing fields take their defaults:
///
/// ```
/// use r10k_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "pipeline": { "issue_queue_size": 8, "rollback_width": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 500);
/// assert_eq!(config.pipeline.issue_queue_size, 8);
/// assert_eq!(config.pipeline.rollback_width, Some(4));
/// assert_eq!(config.pipeline.fetch_width, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline structure sizes and functional-unit timing
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero widths, capacities, unit counts and latencies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        let fields = [
            ("fetch_width", p.fetch_width as u64),
            ("decode_buffer_size", p.decode_buffer_size as u64),
            ("dispatch_width", p.dispatch_width as u64),
            ("commit_width", p.commit_width as u64),
            ("active_list_size", p.active_list_size as u64),
            ("issue_queue_size", p.issue_queue_size as u64),
            ("alu_units", p.alu_units as u64),
            ("alu_latency", p.alu_latency),
            ("muldiv_units", p.muldiv_units as u64),
            ("muldiv_latency", p.muldiv_latency),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Zero(*name));
        }
        if p.rollback_width == Some(0) {
            return Err(ConfigError::Zero("rollback_width"));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-instruction stage events at `trace` level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Safety limit on simulated cycles for `run_to_completion`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// PC that Fetch resumes from after a precise exception.
    #[serde(default = "GeneralConfig::default_exception_handler_pc")]
    pub exception_handler_pc: u64,
}

impl GeneralConfig {
    /// Returns the default cycle limit.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Returns the default exception handler PC.
    const fn default_exception_handler_pc() -> u64 {
        DEFAULT_EXCEPTION_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
            exception_handler_pc: DEFAULT_EXCEPTION_PC,
        }
    }
}

/// Pipeline structure sizes, widths and functional-unit timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    /// Instructions fetched per cycle
    #[serde(default = "PipelineConfig::default_fetch_width")]
    pub fetch_width: usize,

    /// Capacity of the decode buffer between Fetch and Dispatch
    #[serde(default = "PipelineConfig::default_decode_buffer_size")]
    pub decode_buffer_size: usize,

    /// Instructions renamed and dispatched per cycle
    #[serde(default = "PipelineConfig::default_dispatch_width")]
    pub dispatch_width: usize,

    /// Instructions retired per cycle
    #[serde(default = "PipelineConfig::default_commit_width")]
    pub commit_width: usize,

    /// Active list capacity (`A`); tags range over `0..A`
    #[serde(default = "PipelineConfig::default_active_list_size")]
    pub active_list_size: usize,

    /// Issue queue capacity (`I`)
    #[serde(default = "PipelineConfig::default_issue_queue_size")]
    pub issue_queue_size: usize,

    /// Number of single-cycle ALU units
    #[serde(default = "PipelineConfig::default_alu_units")]
    pub alu_units: usize,

    /// ALU latency in cycles
    #[serde(default = "PipelineConfig::default_alu_latency")]
    pub alu_latency: u64,

    /// Number of multiply/divide units
    #[serde(default = "PipelineConfig::default_muldiv_units")]
    pub muldiv_units: usize,

    /// Multiply/divide latency in cycles
    #[serde(default = "PipelineConfig::default_muldiv_latency")]
    pub muldiv_latency: u64,

    /// Active-list entries rolled back per cycle after an exception.
    /// `None` discards the whole squashed window in the detection cycle.
    #[serde(default)]
    pub rollback_width: Option<usize>,
}

impl PipelineConfig {
    /// Returns the default fetch width.
    const fn default_fetch_width() -> usize {
        defaults::FETCH_WIDTH
    }

    /// Returns the default decode buffer capacity.
    const fn default_decode_buffer_size() -> usize {
        defaults::DECODE_BUFFER_SIZE
    }

    /// Returns the default dispatch width.
    const fn default_dispatch_width() -> usize {
        defaults::DISPATCH_WIDTH
    }

    /// Returns the default commit width.
    const fn default_commit_width() -> usize {
        defaults::COMMIT_WIDTH
    }

    /// Returns the default active list capacity.
    const fn default_active_list_size() -> usize {
        defaults::ACTIVE_LIST_SIZE
    }

    /// Returns the default issue queue capacity.
    const fn default_issue_queue_size() -> usize {
        defaults::ISSUE_QUEUE_SIZE
    }

    /// Returns the default ALU count.
    const fn default_alu_units() -> usize {
        defaults::ALU_UNITS
    }

    /// Returns the default ALU latency.
    const fn default_alu_latency() -> u64 {
        defaults::ALU_LATENCY
    }

    /// Returns the default multiply/divide unit count.
    const fn default_muldiv_units() -> usize {
        defaults::MULDIV_UNITS
    }

    /// Returns the default multiply/divide latency.
    const fn default_muldiv_latency() -> u64 {
        defaults::MULDIV_LATENCY
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_width: defaults::FETCH_WIDTH,
            decode_buffer_size: defaults::DECODE_BUFFER_SIZE,
            dispatch_width: defaults::DISPATCH_WIDTH,
            commit_width: defaults::COMMIT_WIDTH,
            active_list_size: defaults::ACTIVE_LIST_SIZE,
            issue_queue_size: defaults::ISSUE_QUEUE_SIZE,
            alu_units: defaults::ALU_UNITS,
            alu_latency: defaults::ALU_LATENCY,
            muldiv_units: defaults::MULDIV_UNITS,
            muldiv_latency: defaults::MULDIV_LATENCY,
            rollback_width: None,
        }
    }
}

//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the out-of-order core. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions, and derived metrics.
//! 2. **Pipeline flow:** Fetched, dispatched, issued, completed and squashed counts.
//! 3. **Stalls:** Dispatch stalls caused by a full active list or issue queue.
//! 4. **Exceptions:** Precise exceptions taken and cycles spent rolling back.

use std::fmt;

use crate::isa::UnitClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions placed in the decode buffer.
    pub instructions_fetched: u64,
    /// Instructions renamed into the active list and issue queue.
    pub instructions_dispatched: u64,
    /// Instructions sent to a functional unit.
    pub instructions_issued: u64,
    /// Results delivered on the broadcast bus.
    pub instructions_completed: u64,
    /// Number of instructions committed (retired).
    pub instructions_committed: u64,
    /// Active-list entries discarded by rollback.
    pub instructions_squashed: u64,

    /// Issued operations per unit class, indexed by `UnitClass::index`.
    pub issued_per_class: [u64; UnitClass::ALL.len()],

    /// Dispatch stall cycles with a full active list.
    pub stalls_active_list_full: u64,
    /// Dispatch stall cycles with a full issue queue.
    pub stalls_issue_queue_full: u64,
    /// Fetch cycles that stopped because the decode buffer was full.
    pub stalls_decode_buffer_full: u64,

    /// Number of precise exceptions taken.
    pub exceptions_taken: u64,
    /// Cycles spent in exception recovery.
    pub rollback_cycles: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"stalls"`, `"exceptions"`.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "stalls", "exceptions"];

impl SimStats {
    /// Committed instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.instructions_committed as f64 / self.cycles as f64
    }

    /// Renders only the requested sections. An empty slice renders all of them.
    pub fn report<'a>(&'a self, sections: &'a [String]) -> StatsReport<'a> {
        StatsReport {
            stats: self,
            sections,
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report(&[]).fmt(f)
    }
}

/// Text report over a subset of `STATS_SECTIONS`.
#[derive(Debug)]
pub struct StatsReport<'a> {
    stats: &'a SimStats,
    sections: &'a [String],
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let want = |s: &str| self.sections.is_empty() || self.sections.iter().any(|x| x == s);
        let s = self.stats;

        writeln!(f, "==========================================================")?;
        if want("summary") {
            writeln!(f, "SUMMARY")?;
            writeln!(f, "  cycles                 {}", s.cycles)?;
            writeln!(f, "  committed              {}", s.instructions_committed)?;
            writeln!(f, "  IPC                    {:.3}", s.ipc())?;
        }
        if want("pipeline") {
            writeln!(f, "PIPELINE")?;
            writeln!(f, "  fetched                {}", s.instructions_fetched)?;
            writeln!(f, "  dispatched             {}", s.instructions_dispatched)?;
            writeln!(f, "  issued                 {}", s.instructions_issued)?;
            for class in UnitClass::ALL {
                writeln!(
                    f,
                    "    {:<20} {}",
                    class.to_string(),
                    s.issued_per_class[class.index()]
                )?;
            }
            writeln!(f, "  completed              {}", s.instructions_completed)?;
            writeln!(f, "  squashed               {}", s.instructions_squashed)?;
        }
        if want("stalls") {
            writeln!(f, "STALLS")?;
            writeln!(f, "  active list full       {}", s.stalls_active_list_full)?;
            writeln!(f, "  issue queue full       {}", s.stalls_issue_queue_full)?;
            writeln!(f, "  decode buffer full     {}", s.stalls_decode_buffer_full)?;
        }
        if want("exceptions") {
            writeln!(f, "EXCEPTIONS")?;
            writeln!(f, "  taken                  {}", s.exceptions_taken)?;
            writeln!(f, "  rollback cycles        {}", s.rollback_cycles)?;
        }
        writeln!(f, "==========================================================")
    }
}

//! Precise exception recovery.
//!
//! When the active-list head completes with an exception, the engine squashes
//! the issue queue, functional units, completion latch and decode buffer, then
//! hands the active list to the `RollbackController`. The controller pops
//! entries youngest-first, restoring each entry's saved map-table binding, until
//! the excepting entry itself has been discarded. The map table then equals its
//! state from just before the excepting instruction was dispatched.
//!
//! Rollback either finishes in the detection cycle or proceeds a fixed number
//! of entries per cycle while the core sits in recovery mode.

use serde::Serialize;
use tracing::{debug, trace};

use crate::common::error::{ConsistencyViolation, ExceptionCause};
use crate::core::pipeline::active_list::{ActiveList, Tag};
use crate::core::pipeline::renamer::Renamer;

/// A precise exception taken by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExceptionRecord {
    /// Program counter of the excepting instruction.
    #[serde(rename = "PC")]
    pub pc: u64,
    /// Tag the instruction held.
    pub tag: Tag,
    /// What went wrong.
    pub cause: ExceptionCause,
    /// Cycle in which the exception was detected at the head.
    pub cycle: u64,
}

/// Recovery mode of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RecoveryState {
    /// Normal operation.
    #[default]
    Normal,
    /// Rolling back toward the excepting entry `target`.
    Recovering {
        /// Tag of the excepting instruction.
        target: Tag,
    },
}

/// Outcome of one rollback step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollbackProgress {
    /// Entries discarded in this step.
    pub squashed: usize,
    /// Whether the excepting entry has been discarded.
    pub done: bool,
}

/// Drives active-list rollback after a precise exception.
#[derive(Clone, Debug)]
pub struct RollbackController {
    width: Option<usize>,
    state: RecoveryState,
}

impl RollbackController {
    /// Creates a controller; `width` of `None` rolls back the whole window at once.
    pub const fn new(width: Option<usize>) -> Self {
        Self {
            width,
            state: RecoveryState::Normal,
        }
    }

    /// Whether a rollback is in progress.
    pub const fn is_recovering(&self) -> bool {
        matches!(self.state, RecoveryState::Recovering { .. })
    }

    /// Whether rollback completes in the detection cycle.
    pub const fn is_atomic(&self) -> bool {
        self.width.is_none()
    }

    /// Enters recovery mode, rolling back through `target`.
    pub fn begin(&mut self, target: Tag) {
        debug!(target = target.0, "entering exception recovery");
        self.state = RecoveryState::Recovering { target };
    }

    /// Rolls back up to one step's worth of entries.
    ///
    /// # Errors
    ///
    /// `RollbackTargetMissing` if the active list empties before the excepting
    /// entry is reached.
    pub fn step(
        &mut self,
        active_list: &mut ActiveList,
        renamer: &mut Renamer,
        trace: bool,
    ) -> Result<RollbackProgress, ConsistencyViolation> {
        let RecoveryState::Recovering { target } = self.state else {
            return Ok(RollbackProgress {
                squashed: 0,
                done: true,
            });
        };
        let budget = self.width.unwrap_or(usize::MAX);

        let mut squashed = 0;
        let mut done = false;
        while squashed < budget && !done {
            let entry = active_list
                .pop_youngest()
                .ok_or(ConsistencyViolation::RollbackTargetMissing(target))?;
            if let (Some(rd), Some(old)) = (entry.dest, entry.old_mapping) {
                renamer.restore(rd, old);
            }
            if trace {
                trace!(pc = entry.pc, tag = entry.tag.0, "RB  squash {}", entry.opcode);
            }
            squashed += 1;
            done = entry.tag == target;
        }

        if done {
            renamer.release_dead(active_list);
            self.state = RecoveryState::Normal;
            debug!(target = target.0, "exception recovery complete");
        }
        Ok(RollbackProgress { squashed, done })
    }
}

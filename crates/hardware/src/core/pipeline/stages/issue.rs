//! Issue Stage: select ready instructions and start them on functional units.
//!
//! Selection is oldest-first within each unit class, bounded by the number of
//! idle units of that class. Units freed by this cycle's Execute are already
//! idle here. Selected entries leave the issue queue in the same step.

use tracing::trace;

use crate::common::error::ConsistencyViolation;
use crate::core::pipeline::active_list::ActiveList;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::units::UnitPool;
use crate::stats::SimStats;

/// Executes the Issue stage.
///
/// # Returns
///
/// The number of operations issued.
pub fn issue_stage(
    issue_queue: &mut IssueQueue,
    units: &mut UnitPool,
    active_list: &ActiveList,
    stats: &mut SimStats,
    trace: bool,
) -> Result<usize, ConsistencyViolation> {
    let selected = issue_queue.select_ready(units.free_per_class(), |tag| active_list.age(tag));
    let issued = selected.len();
    for op in selected {
        let class = op.opcode.unit_class();
        units
            .accept(op)
            .map_err(|_| ConsistencyViolation::UnitOversubscribed(class))?;
        stats.issued_per_class[class.index()] += 1;
        if trace {
            trace!(pc = op.pc, tag = op.tag.0, "IS  {} a={:#x} b={:#x}", op.opcode, op.a, op.b);
        }
    }
    stats.instructions_issued += issued as u64;
    Ok(issued)
}

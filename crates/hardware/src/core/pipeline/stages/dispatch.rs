//! Dispatch Stage: rename and insert into the active list and issue queue.
//!
//! Instructions leave the decode buffer in program order. For each one:
//! 1. Both an active-list slot and an issue-queue slot must be free, otherwise
//!    the instruction stays in the decode buffer and Dispatch stops for the cycle.
//! 2. Source operands are resolved through the map table *before* the
//!    destination is rebound, so `add x1, x1, x2` reads the old `x1`.
//! 3. The destination's previous binding is saved in the active-list entry
//!    for rollback.
//!
//! Dispatch runs after this cycle's Commit and Writeback, so it sees the
//! map table as they left it. An earlier instruction of the same dispatch
//! group is visible as a pending producer, never as a ready value.

use tracing::trace;

use crate::common::error::{ConsistencyViolation, StructuralHazard};
use crate::core::pipeline::active_list::ActiveList;
use crate::core::pipeline::issue_queue::{IssueQueue, IssueQueueEntry, Operand};
use crate::core::pipeline::latches::DecodeBuffer;
use crate::core::pipeline::renamer::Renamer;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Resolves the two source operands of `inst`.
///
/// A missing register source reads the immediate (or zero).
fn resolve_operands(inst: &Instruction, renamer: &Renamer) -> [Operand; 2] {
    let [rs1, rs2] = inst.sources;
    let a = rs1.map_or(Operand::Ready(0), |r| renamer.rename_lookup(r));
    let b = match (rs2, inst.imm) {
        (Some(r), _) => renamer.rename_lookup(r),
        (None, imm) => Operand::Ready(imm.unwrap_or(0)),
    };
    [a, b]
}

/// Executes the Dispatch stage.
///
/// Moves up to `width` instructions from the decode buffer. A full active list
/// or issue queue stalls the remainder of the group.
///
/// # Returns
///
/// The number of instructions dispatched.
pub fn dispatch_stage(
    decode_buffer: &mut DecodeBuffer,
    renamer: &mut Renamer,
    active_list: &mut ActiveList,
    issue_queue: &mut IssueQueue,
    width: usize,
    stats: &mut SimStats,
    trace: bool,
) -> Result<usize, ConsistencyViolation> {
    let mut dispatched = 0;
    while dispatched < width {
        let Some(&inst) = decode_buffer.front() else {
            break;
        };
        let Some(tag) = active_list.next_tag() else {
            stats.stalls_active_list_full += 1;
            if trace {
                trace!(pc = inst.pc, "DS  stall: {}", StructuralHazard::ActiveListFull);
            }
            break;
        };
        if issue_queue.is_full() {
            stats.stalls_issue_queue_full += 1;
            if trace {
                trace!(pc = inst.pc, "DS  stall: {}", StructuralHazard::IssueQueueFull);
            }
            break;
        }

        let operands = resolve_operands(&inst, renamer);
        let old_mapping = inst.dest.map(|rd| renamer.rename_bind(rd, tag));

        let allocated = active_list
            .allocate(inst.pc, inst.opcode, inst.dest, old_mapping)
            .map_err(|_| ConsistencyViolation::CapacityExceeded {
                structure: "active list",
                len: active_list.len() + 1,
                capacity: active_list.capacity(),
            })?;
        if allocated != tag {
            return Err(ConsistencyViolation::TagCollision(allocated));
        }
        issue_queue
            .dispatch(IssueQueueEntry {
                tag,
                pc: inst.pc,
                opcode: inst.opcode,
                operands,
            })
            .map_err(|_| ConsistencyViolation::CapacityExceeded {
                structure: "issue queue",
                len: issue_queue.len() + 1,
                capacity: issue_queue.capacity(),
            })?;
        let _ = decode_buffer.pop_front();

        if trace {
            trace!(pc = inst.pc, tag = tag.0, "DS  {inst} {operands:?}");
        }
        dispatched += 1;
    }
    stats.instructions_dispatched += dispatched as u64;
    Ok(dispatched)
}

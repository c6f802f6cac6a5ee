//! Commit Stage: retire instructions from the active-list head.
//!
//! Retires up to `width` instructions per cycle in program order. An entry
//! retires only when it is the head, has completed, and raised no exception.
//! Its value is written to the committed register file and the map table
//! entry is released if this entry is still the register's producer.
//! An excepting head stops commit; the engine's exception check takes over.

use tracing::trace;

use crate::common::error::ConsistencyViolation;
use crate::core::pipeline::active_list::ActiveList;
use crate::core::pipeline::renamer::Renamer;
use crate::stats::SimStats;

/// Executes the Commit stage.
///
/// # Returns
///
/// The number of instructions committed.
pub fn commit_stage(
    active_list: &mut ActiveList,
    renamer: &mut Renamer,
    width: usize,
    stats: &mut SimStats,
    trace: bool,
) -> Result<usize, ConsistencyViolation> {
    let mut committed = 0;
    while committed < width {
        let Some(head) = active_list.peek_head() else {
            break;
        };
        if !head.is_completed() || head.exception.is_some() {
            break;
        }
        let tag = head.tag;
        let entry = active_list.commit(tag)?;
        if let Some(rd) = entry.dest {
            renamer.commit_register(rd, tag, entry.result);
        }
        if trace {
            trace!(pc = entry.pc, tag = tag.0, result = entry.result, "CM  {}", entry.opcode);
        }
        committed += 1;
    }
    stats.instructions_committed += committed as u64;
    Ok(committed)
}

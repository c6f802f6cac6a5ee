//! Writeback Stage: the broadcast bus.
//!
//! Results latched by the previous cycle's Execute are fanned out, in the same
//! step, to:
//! 1. The active list, which marks the entry completed and records any exception.
//! 2. The issue queue, waking every operand waiting on the tag.
//! 3. The map table, which stages the value only while the tag is still the
//!    destination register's current producer.

use tracing::trace;

use crate::common::error::ConsistencyViolation;
use crate::core::pipeline::active_list::ActiveList;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::CompletionLatch;
use crate::core::pipeline::renamer::Renamer;
use crate::stats::SimStats;

/// Executes the Writeback stage.
///
/// # Returns
///
/// The number of results broadcast.
pub fn writeback_stage(
    completions: &mut CompletionLatch,
    active_list: &mut ActiveList,
    issue_queue: &mut IssueQueue,
    renamer: &mut Renamer,
    stats: &mut SimStats,
    trace: bool,
) -> Result<usize, ConsistencyViolation> {
    let results = completions.take();
    for c in &results {
        let dest = active_list.complete(c.tag, c.value, c.exception)?;
        let woken = issue_queue.broadcast_wakeup(c.tag, c.value);
        let staged = dest.is_some_and(|rd| renamer.record_broadcast(rd, c.tag, c.value));
        if trace {
            trace!(tag = c.tag.0, value = c.value, woken, staged, "WB  broadcast");
        }
    }
    stats.instructions_completed += results.len() as u64;
    Ok(results.len())
}

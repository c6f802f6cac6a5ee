//! Execute Stage: advance functional units and latch finished results.
//!
//! Every busy unit counts down one cycle. Operations whose latency elapses
//! are evaluated through the opcode semantics and placed in the completion
//! latch, to be broadcast at the start of the next cycle.

use tracing::trace;

use crate::core::pipeline::latches::CompletionLatch;
use crate::core::units::UnitPool;
use crate::core::units::alu::OpcodeSemantics;

/// Executes the Execute stage.
///
/// # Returns
///
/// The number of operations that finished this cycle.
pub fn execute_stage<S: OpcodeSemantics>(
    units: &mut UnitPool,
    semantics: &S,
    completions: &mut CompletionLatch,
    trace: bool,
) -> usize {
    let finished = units.tick(semantics);
    let count = finished.len();
    for completion in finished {
        if trace {
            trace!(
                tag = completion.tag.0,
                value = completion.value,
                exception = ?completion.exception,
                "EX  done"
            );
        }
        completions.push(completion);
    }
    count
}

//! Fetch Stage: fill the decode buffer in program order.
//!
//! Fetch reads up to `width` instructions starting at the current PC and
//! stops early when the decode buffer is full or the PC runs off the end of
//! the program. Instructions left unfetched are retried next cycle.

use tracing::trace;

use crate::core::pipeline::frontend::Frontend;
use crate::isa::Program;
use crate::stats::SimStats;

/// Executes the Fetch stage.
///
/// # Returns
///
/// The number of instructions fetched this cycle.
pub fn fetch_stage(
    frontend: &mut Frontend,
    program: &Program,
    width: usize,
    stats: &mut SimStats,
    trace: bool,
) -> usize {
    let mut fetched = 0;
    while fetched < width {
        let Some(inst) = program.fetch(frontend.pc) else {
            break;
        };
        if !frontend.decode_buffer.push(inst) {
            stats.stalls_decode_buffer_full += 1;
            break;
        }
        if trace {
            trace!(pc = inst.pc, "IF  {inst}");
        }
        frontend.pc += 1;
        fetched += 1;
    }
    stats.instructions_fetched += fetched as u64;
    fetched
}

//! Frontend state: program counter and decode buffer.
//!
//! Fetch walks the static program straight-line (no control-flow speculation)
//! and deposits instructions in the decode buffer, where Dispatch picks them up.
//! A precise exception flushes the buffer and redirects the PC.

use crate::core::pipeline::latches::DecodeBuffer;
use crate::core::pipeline::traits::PipelineLatch;

/// Fetch-side state of the core.
#[derive(Clone, Debug)]
pub struct Frontend {
    /// Address of the next instruction to fetch.
    pub pc: u64,
    /// Fetched instructions waiting for Dispatch.
    pub decode_buffer: DecodeBuffer,
}

impl Frontend {
    /// Creates a frontend fetching from PC 0.
    pub fn new(decode_buffer_size: usize) -> Self {
        Self {
            pc: 0,
            decode_buffer: DecodeBuffer::new(decode_buffer_size),
        }
    }

    /// Discards buffered instructions and resumes fetch at `target`.
    ///
    /// Returns the number of instructions discarded.
    pub fn redirect(&mut self, target: u64) -> usize {
        let discarded = self.decode_buffer.len();
        self.decode_buffer.flush();
        self.pc = target;
        discarded
    }
}

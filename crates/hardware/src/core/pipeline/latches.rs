//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between pipeline stages:
//! Fetch → Dispatch → Issue → Execute → Broadcast → Commit.
//!
//! 1. **Decode Buffer:** Fetched instructions waiting for rename and dispatch.
//! 2. **Issued Operations:** Fully-resolved operations handed to a functional unit.
//! 3. **Completion Latch:** Results waiting for next cycle's broadcast.

use std::collections::VecDeque;

use crate::common::error::ExceptionCause;
use crate::core::pipeline::active_list::Tag;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::{Instruction, Opcode};

/// Fetched instructions in program order, waiting for Dispatch.
///
/// Called the "decoded instruction register" in the reference design.
#[derive(Clone, Debug)]
pub struct DecodeBuffer {
    entries: VecDeque<Instruction>,
    capacity: usize,
}

impl DecodeBuffer {
    /// Creates an empty buffer holding at most `capacity` instructions.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of buffered instructions.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffered instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Free slots.
    #[inline]
    pub fn room(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }

    /// Appends a fetched instruction. Returns `false` when full.
    pub fn push(&mut self, inst: Instruction) -> bool {
        if self.room() == 0 {
            return false;
        }
        self.entries.push_back(inst);
        true
    }

    /// Oldest buffered instruction.
    #[inline]
    pub fn front(&self) -> Option<&Instruction> {
        self.entries.front()
    }

    /// Removes the oldest buffered instruction.
    pub fn pop_front(&mut self) -> Option<Instruction> {
        self.entries.pop_front()
    }

    /// Buffered instructions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter()
    }
}

impl PipelineLatch for DecodeBuffer {
    fn flush(&mut self) {
        self.entries.clear();
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An operation selected for issue with both operand values resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuedOp {
    /// Tag of the producing active-list entry.
    pub tag: Tag,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// First operand value.
    pub a: u64,
    /// Second operand value.
    pub b: u64,
}

/// A finished operation presented to the broadcast bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Tag of the producing active-list entry.
    pub tag: Tag,
    /// Result value (0 when an exception was raised).
    pub value: u64,
    /// Exception raised by evaluation, if any.
    pub exception: Option<ExceptionCause>,
}

/// Results produced by Execute, broadcast at the start of the next cycle.
#[derive(Clone, Debug, Default)]
pub struct CompletionLatch {
    entries: Vec<Completion>,
}

impl CompletionLatch {
    /// Latches a completion.
    pub fn push(&mut self, completion: Completion) {
        self.entries.push(completion);
    }

    /// Takes every latched completion.
    pub fn take(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.entries)
    }

    /// Latched completions.
    pub fn iter(&self) -> impl Iterator<Item = &Completion> {
        self.entries.iter()
    }
}

impl PipelineLatch for CompletionLatch {
    fn flush(&mut self) {
        self.entries.clear();
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

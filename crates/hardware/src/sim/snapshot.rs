//! Per-cycle structural snapshot.
//!
//! A `Snapshot` is a plain, serializable copy of every structure the core
//! exposes: program counter, decode buffer, exception status, committed
//! registers, busy bits, map table, active list and issue queue. Field names
//! follow the PascalCase trace format consumed by reference-trace comparisons.

use serde::Serialize;

use crate::core::pipeline::active_list::{ActiveListEntry, Tag};
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::issue_queue::IssueQueueEntry;
use crate::isa::Opcode;

/// One active-list entry as it appears in the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActiveListRecord {
    /// Entry tag.
    pub tag: Tag,
    /// Program counter.
    #[serde(rename = "PC")]
    pub pc: u64,
    /// Destination architectural register.
    pub logical_destination: Option<usize>,
    /// Producer tag the destination was mapped to before this instruction.
    pub old_destination: Option<Tag>,
    /// Result broadcast.
    pub done: bool,
    /// Completed with an exception.
    pub exception: bool,
}

impl From<&ActiveListEntry> for ActiveListRecord {
    fn from(e: &ActiveListEntry) -> Self {
        Self {
            tag: e.tag,
            pc: e.pc,
            logical_destination: e.dest,
            old_destination: e.old_mapping.and_then(|m| m.producer()),
            done: e.is_completed(),
            exception: e.exception.is_some(),
        }
    }
}

/// One issue-queue entry as it appears in the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntegerQueueRecord {
    /// Entry tag.
    pub tag: Tag,
    /// Destination tag (the entry's own tag).
    pub dest_tag: Tag,
    /// Operation.
    pub op_code: Opcode,
    /// Program counter.
    #[serde(rename = "PC")]
    pub pc: u64,
    /// Operand A available.
    pub op_a_is_ready: bool,
    /// Producer of operand A while waiting.
    pub op_a_reg_tag: Option<Tag>,
    /// Value of operand A once ready.
    pub op_a_value: Option<u64>,
    /// Operand B available.
    pub op_b_is_ready: bool,
    /// Producer of operand B while waiting.
    pub op_b_reg_tag: Option<Tag>,
    /// Value of operand B once ready.
    pub op_b_value: Option<u64>,
}

impl From<&IssueQueueEntry> for IntegerQueueRecord {
    fn from(e: &IssueQueueEntry) -> Self {
        let [a, b] = e.operands;
        Self {
            tag: e.tag,
            dest_tag: e.tag,
            op_code: e.opcode,
            pc: e.pc,
            op_a_is_ready: a.is_ready(),
            op_a_reg_tag: a.tag(),
            op_a_value: a.value(),
            op_b_is_ready: b.is_ready(),
            op_b_reg_tag: b.tag(),
            op_b_value: b.value(),
        }
    }
}

/// Read-only copy of the core's state after a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    /// Cycles completed (0 for the initial state).
    pub cycle: u64,
    /// Next fetch address.
    #[serde(rename = "PC")]
    pub pc: u64,
    /// PCs waiting in the decode buffer, oldest first.
    #[serde(rename = "DecodedPCs")]
    pub decoded_pcs: Vec<u64>,
    /// Core is handling a precise exception this cycle.
    pub exception: bool,
    /// PC of the most recent excepting instruction (0 if none).
    #[serde(rename = "ExceptionPC")]
    pub exception_pc: u64,
    /// Committed register values.
    pub register_file: Vec<u64>,
    /// Registers still waiting for their producer's broadcast.
    pub busy_bit_table: Vec<bool>,
    /// Producer tag per register, `null` when ready.
    pub register_map_table: Vec<Option<Tag>>,
    /// Active list, head first.
    pub active_list: Vec<ActiveListRecord>,
    /// Issue queue, in dispatch order.
    pub integer_queue: Vec<IntegerQueueRecord>,
}

impl Snapshot {
    /// Copies the observable state of `pipeline` at the end of `cycle`.
    pub fn capture(cycle: u64, pipeline: &Pipeline) -> Self {
        let map = pipeline.renamer.map_table().entries();
        let last = pipeline.last_exception;
        Self {
            cycle,
            pc: pipeline.frontend.pc,
            decoded_pcs: pipeline.frontend.decode_buffer.iter().map(|i| i.pc).collect(),
            exception: pipeline.recovery.is_recovering()
                || last.is_some_and(|r| r.cycle == cycle),
            exception_pc: last.map_or(0, |r| r.pc),
            register_file: pipeline.renamer.registers().values().to_vec(),
            busy_bit_table: map.iter().map(|m| m.is_busy()).collect(),
            register_map_table: map.iter().map(|m| m.producer()).collect(),
            active_list: pipeline.active_list.iter().map(Into::into).collect(),
            integer_queue: pipeline.issue_queue.iter().map(Into::into).collect(),
        }
    }
}

//! Error types and exception causes.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Structural Hazards:** Recoverable resource shortages that stall a stage for a cycle.
//! 2. **Instruction Exceptions:** Faults raised by opcode evaluation, handled by precise rollback.
//! 3. **Consistency Violations:** Fatal internal errors that halt the run.
//! 4. **Input Errors:** Configuration and program parsing failures.

use thiserror::Error;

use crate::core::pipeline::active_list::Tag;
use crate::isa::{Opcode, UnitClass};

/// A structure could not accept work this cycle.
///
/// The stage that receives one stalls the affected instruction and retries
/// on the next cycle; these never escape the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StructuralHazard {
    /// Issue queue occupancy equals its capacity.
    #[error("issue queue is full")]
    IssueQueueFull,
    /// Every active-list slot holds an in-flight instruction.
    #[error("active list is full")]
    ActiveListFull,
    /// Every functional unit of the class is busy.
    #[error("no free {0} unit")]
    NoFreeUnit(UnitClass),
}

/// Exception raised by evaluating an opcode.
///
/// Recorded on the producing active-list entry and handled precisely once the
/// entry reaches the head of the active list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, serde::Serialize)]
pub enum ExceptionCause {
    /// `divu` or `remu` with a zero divisor.
    #[error("division by zero")]
    DivideByZero,
}

/// Internal inconsistency between pipeline structures.
///
/// These indicate a defect in the simulator itself and halt the run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConsistencyViolation {
    /// Commit was attempted on an entry that is not the active-list head.
    #[error("commit of tag {tag} while the active-list head is {head:?}")]
    CommitNotAtHead {
        /// Tag that was asked to commit.
        tag: Tag,
        /// Tag actually at the head, if any.
        head: Option<Tag>,
    },
    /// Commit was attempted on a head entry that has not completed cleanly.
    #[error("commit of tag {0} before it completed without exception")]
    CommitNotReady(Tag),
    /// A tag does not name any in-flight instruction.
    #[error("tag {0} does not name an in-flight instruction")]
    UnknownTag(Tag),
    /// Two in-flight instructions share a tag.
    #[error("tag {0} is in flight more than once")]
    TagCollision(Tag),
    /// A completion arrived for an entry that had already completed.
    #[error("tag {0} completed twice")]
    DuplicateCompletion(Tag),
    /// Rollback emptied the active list without reaching the excepting entry.
    #[error("rollback never reached excepting tag {0}")]
    RollbackTargetMissing(Tag),
    /// A structure grew past its configured capacity.
    #[error("{structure} holds {len} entries, capacity is {capacity}")]
    CapacityExceeded {
        /// Name of the structure.
        structure: &'static str,
        /// Observed occupancy.
        len: usize,
        /// Configured capacity.
        capacity: usize,
    },
    /// A structure references an instruction that is no longer in flight.
    #[error("{structure} references tag {tag} which is not in flight")]
    OrphanTag {
        /// Name of the structure.
        structure: &'static str,
        /// Dangling tag.
        tag: Tag,
    },
    /// A register index outside the architectural register file.
    #[error("architectural register {0} does not exist")]
    RegisterOutOfRange(usize),
    /// Issue selected more operations than there were free units.
    #[error("issue selected more {0} operations than free units")]
    UnitOversubscribed(UnitClass),
    /// An operation reached a unit of the wrong class.
    #[error("{0} routed to a {1} unit")]
    WrongUnitClass(Opcode, UnitClass),
}

/// Invalid simulator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A width, capacity, count or latency was zero.
    #[error("{0} must be non-zero")]
    Zero(&'static str),
    /// The configuration document could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Parse(String),
    /// The configuration file could not be read.
    #[error("cannot read configuration file: {0}")]
    Io(String),
}

/// Malformed program input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// The mnemonic is not part of the supported integer subset.
    #[error("line {line}: unknown opcode `{opcode}`")]
    UnknownOpcode {
        /// Zero-based instruction index.
        line: usize,
        /// Offending mnemonic.
        opcode: String,
    },
    /// The instruction did not have exactly three operands.
    #[error("line {line}: expected 3 operands, found {found}")]
    OperandCount {
        /// Zero-based instruction index.
        line: usize,
        /// Number of operands found.
        found: usize,
    },
    /// An operand is not a register name `x0`-`x31`.
    #[error("line {line}: invalid register `{name}`")]
    InvalidRegister {
        /// Zero-based instruction index.
        line: usize,
        /// Offending operand text.
        name: String,
    },
    /// The immediate operand is not an integer.
    #[error("line {line}: invalid immediate `{text}`")]
    InvalidImmediate {
        /// Zero-based instruction index.
        line: usize,
        /// Offending operand text.
        text: String,
    },
    /// The program document is not a JSON array of strings.
    #[error("invalid program JSON: {0}")]
    Json(String),
    /// The program file could not be read.
    #[error("cannot read program file: {0}")]
    Io(String),
}

/// Top-level simulator error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Fatal internal inconsistency; the simulator is halted.
    #[error("consistency violation: {0}")]
    Consistency(#[from] ConsistencyViolation),
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Invalid program.
    #[error(transparent)]
    Program(#[from] ProgramError),
}

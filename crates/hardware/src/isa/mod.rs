//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the integer subset executed by the core, the decoded instruction
//! record consumed by Dispatch, and the parser for the textual program format.
//!
//! # Opcodes
//!
//! * `add`, `addi`, `sub`: single-cycle ALU class.
//! * `mulu`, `divu`, `remu`: multi-cycle multiply/divide class.

/// Textual program decoding (`"add x1, x2, x3"`).
pub mod decode;

/// Opcodes, unit classes and decoded instruction records.
pub mod instruction;

/// PC-indexed instruction stream.
pub mod program;

pub use instruction::{Instruction, Opcode, UnitClass};
pub use program::Program;

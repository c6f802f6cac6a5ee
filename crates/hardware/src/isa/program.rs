//! PC-indexed instruction stream.
//!
//! The core fetches straight-line code: the instruction at PC `n` is the
//! `n`-th element of the program, and any PC past the end (including the
//! exception handler address) fetches nothing.

use crate::common::error::ProgramError;
use crate::common::reg::RegisterFile;
use crate::isa::instruction::Instruction;

/// A finite, ordered sequence of decoded instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Builds a program, assigning each instruction its index as PC.
    ///
    /// Fails if any instruction names a register outside `x0`-`x31`.
    pub fn new(instructions: impl IntoIterator<Item = Instruction>) -> Result<Self, ProgramError> {
        let instructions: Vec<Instruction> = instructions
            .into_iter()
            .enumerate()
            .map(|(pc, inst)| inst.at(pc as u64))
            .collect();
        for (line, inst) in instructions.iter().enumerate() {
            if let Some(reg) = inst.registers().find(|&r| !RegisterFile::contains(r)) {
                return Err(ProgramError::InvalidRegister {
                    line,
                    name: format!("x{reg}"),
                });
            }
        }
        Ok(Self { instructions })
    }

    /// Parses the JSON program format (an array of instruction strings).
    pub fn parse_json(json: &str) -> Result<Self, ProgramError> {
        crate::isa::decode::parse_json(json)
    }

    /// Returns the instruction at `pc`, if any.
    #[inline]
    pub fn fetch(&self, pc: u64) -> Option<Instruction> {
        usize::try_from(pc)
            .ok()
            .and_then(|idx| self.instructions.get(idx))
            .copied()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` for an empty program.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

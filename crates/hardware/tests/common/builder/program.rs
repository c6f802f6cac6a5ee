//! Program Builder.
//!
//! Assembles a `Program` one instruction at a time, so tests read like the
//! assembly they exercise:
//!
//! ```ignore
//! let program = ProgramBuilder::new().add(3, 1, 2).sub(4, 3, 1).build();
//! ```

use r10k_core::isa::{Instruction, Opcode};
use r10k_core::Program;

/// Fluent builder for an instruction stream.
#[derive(Debug, Default, Clone)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `add rd, rs1, rs2`
    pub fn add(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.rrr(Opcode::Add, rd, rs1, rs2)
    }

    /// `sub rd, rs1, rs2`
    pub fn sub(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.rrr(Opcode::Sub, rd, rs1, rs2)
    }

    /// `mulu rd, rs1, rs2`
    pub fn mulu(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.rrr(Opcode::Mulu, rd, rs1, rs2)
    }

    /// `divu rd, rs1, rs2`
    pub fn divu(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.rrr(Opcode::Divu, rd, rs1, rs2)
    }

    /// `remu rd, rs1, rs2`
    pub fn remu(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.rrr(Opcode::Remu, rd, rs1, rs2)
    }

    /// `addi rd, rs1, imm`; negative immediates wrap to two's complement.
    pub fn addi(mut self, rd: usize, rs1: usize, imm: i64) -> Self {
        self.instructions
            .push(Instruction::rri(Opcode::Addi, rd, rs1, imm as u64));
        self
    }

    /// Appends an arbitrary register-register instruction.
    pub fn rrr(mut self, opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.instructions
            .push(Instruction::rrr(opcode, rd, rs1, rs2));
        self
    }

    pub fn build(self) -> Program {
        Program::new(self.instructions).expect("builder only emits valid registers")
    }
}

//! Opcodes and decoded instruction records.
//!
//! Provides the opcode enumeration, the functional-unit class each opcode
//! executes on, and the immutable `Instruction` record created by Fetch.

use std::fmt;

use serde::Serialize;

/// Functional-unit class an opcode executes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UnitClass {
    /// Single-cycle arithmetic/logic unit.
    Alu,
    /// Multi-cycle multiply/divide unit.
    MulDiv,
}

impl UnitClass {
    /// Every unit class, in selection order.
    pub const ALL: [Self; 2] = [Self::Alu, Self::MulDiv];

    /// Dense index for per-class tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Alu => 0,
            Self::MulDiv => 1,
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alu => write!(f, "ALU"),
            Self::MulDiv => write!(f, "MulDiv"),
        }
    }
}

/// Integer opcodes supported by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 * rs2` (unsigned, low 64 bits)
    Mulu,
    /// `rd = rs1 / rs2` (unsigned)
    Divu,
    /// `rd = rs1 % rs2` (unsigned)
    Remu,
}

impl Opcode {
    /// Every supported opcode.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Addi,
        Self::Sub,
        Self::Mulu,
        Self::Divu,
        Self::Remu,
    ];

    /// Lowercase assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addi => "addi",
            Self::Sub => "sub",
            Self::Mulu => "mulu",
            Self::Divu => "divu",
            Self::Remu => "remu",
        }
    }

    /// Looks up an opcode by mnemonic (case-insensitive).
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// Functional-unit class that executes this opcode.
    pub const fn unit_class(self) -> UnitClass {
        match self {
            Self::Add | Self::Addi | Self::Sub => UnitClass::Alu,
            Self::Mulu | Self::Divu | Self::Remu => UnitClass::MulDiv,
        }
    }

    /// Whether the second operand is an immediate rather than a register.
    pub const fn has_immediate(self) -> bool {
        matches!(self, Self::Addi)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded instruction. Immutable once fetched.
///
/// `pc` is the instruction's index in the program; `Program` assigns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Program counter (instruction index).
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Destination architectural register.
    pub dest: Option<usize>,
    /// Source architectural registers.
    pub sources: [Option<usize>; 2],
    /// Immediate operand, replacing the second source.
    pub imm: Option<u64>,
}

impl Instruction {
    /// Register-register form: `op rd, rs1, rs2`.
    pub const fn rrr(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self {
            pc: 0,
            opcode,
            dest: Some(rd),
            sources: [Some(rs1), Some(rs2)],
            imm: None,
        }
    }

    /// Register-immediate form: `op rd, rs1, imm`.
    pub const fn rri(opcode: Opcode, rd: usize, rs1: usize, imm: u64) -> Self {
        Self {
            pc: 0,
            opcode,
            dest: Some(rd),
            sources: [Some(rs1), None],
            imm: Some(imm),
        }
    }

    /// Returns a copy placed at `pc`.
    #[must_use]
    pub const fn at(mut self, pc: u64) -> Self {
        self.pc = pc;
        self
    }

    /// Registers this instruction names, destination first.
    pub fn registers(&self) -> impl Iterator<Item = usize> + '_ {
        self.dest.iter().chain(self.sources.iter().flatten()).copied()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}): {}", self.pc, self.opcode)?;
        if let Some(rd) = self.dest {
            write!(f, " x{rd}")?;
        }
        for rs in self.sources.iter().flatten() {
            write!(f, ", x{rs}")?;
        }
        if let Some(imm) = self.imm {
            write!(f, ", {}", imm as i64)?;
        }
        Ok(())
    }
}

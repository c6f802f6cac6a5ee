/// Instruction stream builder.
pub mod program;

//! Textual Instruction Decoder.
//!
//! Decodes the program input format: a JSON array of strings such as
//! `"add x1, x2, x3"` or `"addi x4, x1, -7"`. Register operands are `x0`-`x31`;
//! immediates are decimal or `0x`-prefixed hexadecimal and may be negative.

use crate::common::error::ProgramError;
use crate::common::reg::RegisterFile;
use crate::isa::instruction::{Instruction, Opcode};
use crate::isa::program::Program;

/// Decodes one instruction string.
///
/// # Arguments
///
/// * `line` - Zero-based index of the instruction, used in error reports.
/// * `text` - Instruction text, e.g. `"sub x4, x3, x1"`.
pub fn decode_line(line: usize, text: &str) -> Result<Instruction, ProgramError> {
    let text = text.trim();
    let (mnemonic, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| ProgramError::UnknownOpcode {
        line,
        opcode: mnemonic.to_string(),
    })?;

    let operands: Vec<&str> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let [rd, rs1, last] = operands[..] else {
        return Err(ProgramError::OperandCount {
            line,
            found: operands.len(),
        });
    };

    let rd = parse_register(line, rd)?;
    let rs1 = parse_register(line, rs1)?;
    if opcode.has_immediate() {
        Ok(Instruction::rri(opcode, rd, rs1, parse_immediate(line, last)?))
    } else {
        Ok(Instruction::rrr(opcode, rd, rs1, parse_register(line, last)?))
    }
}

/// Decodes a JSON array of instruction strings into a program.
pub fn parse_json(json: &str) -> Result<Program, ProgramError> {
    let lines: Vec<String> =
        serde_json::from_str(json).map_err(|e| ProgramError::Json(e.to_string()))?;
    let instructions = lines
        .iter()
        .enumerate()
        .map(|(line, text)| decode_line(line, text))
        .collect::<Result<Vec<_>, _>>()?;
    Program::new(instructions)
}

/// Parses a register operand `x<n>`.
fn parse_register(line: usize, text: &str) -> Result<usize, ProgramError> {
    text.strip_prefix('x')
        .or_else(|| text.strip_prefix('X'))
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|&idx| RegisterFile::contains(idx))
        .ok_or_else(|| ProgramError::InvalidRegister {
            line,
            name: text.to_string(),
        })
}

/// Parses an immediate operand into its 64-bit two's complement encoding.
fn parse_immediate(line: usize, text: &str) -> Result<u64, ProgramError> {
    let invalid = || ProgramError::InvalidImmediate {
        line,
        text: text.to_string(),
    };
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = match magnitude
        .strip_prefix("0x")
        .or_else(|| magnitude.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| invalid())?,
        None => magnitude.parse::<u64>().map_err(|_| invalid())?,
    };
    Ok(if negative { value.wrapping_neg() } else { value })
}

//! ALU arithmetic operations.
//!
//! Implements 64-bit integer addition, subtraction, multiplication, and
//! unsigned division for the integer subset. Arithmetic wraps on overflow;
//! only a zero divisor raises an exception.

use crate::common::error::ExceptionCause;
use crate::isa::Opcode;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation to perform.
/// * `a`  - First operand (64-bit value).
/// * `b`  - Second operand (register value or immediate).
///
/// # Returns
///
/// The 64-bit result, or the exception the operation raised.
pub const fn execute(op: Opcode, a: u64, b: u64) -> Result<u64, ExceptionCause> {
    match op {
        Opcode::Add | Opcode::Addi => Ok(a.wrapping_add(b)),
        Opcode::Sub => Ok(a.wrapping_sub(b)),
        Opcode::Mulu => Ok(a.wrapping_mul(b)),
        Opcode::Divu => match a.checked_div(b) {
            Some(q) => Ok(q),
            None => Err(ExceptionCause::DivideByZero),
        },
        Opcode::Remu => match a.checked_rem(b) {
            Some(r) => Ok(r),
            None => Err(ExceptionCause::DivideByZero),
        },
    }
}

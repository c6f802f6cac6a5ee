//! Opcode semantics.
//!
//! Functional units are timing shells: when an operation finishes its
//! latency they ask an [`OpcodeSemantics`] implementation for the result.
//! [`IntegerAlu`] is the built-in implementation; test harnesses may supply
//! their own to inject exceptions or alternate arithmetic.

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

use crate::common::error::ExceptionCause;
use crate::isa::Opcode;

/// Pure `opcode x operands -> result` evaluation.
///
/// Called exactly once per functional-unit completion. Implementations must
/// be free of side effects.
pub trait OpcodeSemantics {
    /// Evaluates `opcode` on operands `a` and `b`.
    ///
    /// # Returns
    ///
    /// The result value, or the exception the instruction raises.
    fn evaluate(&self, opcode: Opcode, a: u64, b: u64) -> Result<u64, ExceptionCause>;
}

/// Integer arithmetic logic unit for the supported opcode subset.
///
/// # Examples
///
/// ```
/// use r10k_core::common::ExceptionCause;
/// use r10k_core::core::units::alu::{IntegerAlu, OpcodeSemantics};
/// use r10k_core::isa::Opcode;
///
/// assert_eq!(IntegerAlu.evaluate(Opcode::Add, 5, 2), Ok(7));
/// assert_eq!(IntegerAlu.evaluate(Opcode::Remu, 100, 7), Ok(2));
/// assert_eq!(
///     IntegerAlu.evaluate(Opcode::Divu, 1, 0),
///     Err(ExceptionCause::DivideByZero)
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegerAlu;

impl OpcodeSemantics for IntegerAlu {
    #[inline]
    fn evaluate(&self, opcode: Opcode, a: u64, b: u64) -> Result<u64, ExceptionCause> {
        arithmetic::execute(opcode, a, b)
    }
}

impl<T: OpcodeSemantics + ?Sized> OpcodeSemantics for &T {
    #[inline]
    fn evaluate(&self, opcode: Opcode, a: u64, b: u64) -> Result<u64, ExceptionCause> {
        (**self).evaluate(opcode, a, b)
    }
}

impl<T: OpcodeSemantics + ?Sized> OpcodeSemantics for Box<T> {
    #[inline]
    fn evaluate(&self, opcode: Opcode, a: u64, b: u64) -> Result<u64, ExceptionCause> {
        (**self).evaluate(opcode, a, b)
    }
}

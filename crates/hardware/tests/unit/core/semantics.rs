//! Integer Semantics Tests.
//!
//! `IntegerAlu` evaluates every opcode with unsigned 64-bit wrapping
//! arithmetic; only a zero divisor raises.

use r10k_core::common::ExceptionCause;
use r10k_core::core::units::alu::{IntegerAlu, OpcodeSemantics};
use r10k_core::isa::Opcode;
use rstest::rstest;

#[rstest]
#[case(Opcode::Add, 5, 2, 7)]
#[case(Opcode::Addi, 5, u64::MAX, 4)]
#[case(Opcode::Sub, 2, 5, 2u64.wrapping_sub(5))]
#[case(Opcode::Mulu, 1 << 32, 1 << 32, 0)]
#[case(Opcode::Mulu, 6, 7, 42)]
#[case(Opcode::Divu, 100, 7, 14)]
#[case(Opcode::Divu, u64::MAX, 2, u64::MAX / 2)]
#[case(Opcode::Remu, 100, 7, 2)]
fn evaluates(#[case] opcode: Opcode, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(IntegerAlu.evaluate(opcode, a, b), Ok(expected));
}

#[rstest]
#[case(Opcode::Divu)]
#[case(Opcode::Remu)]
fn zero_divisor_raises(#[case] opcode: Opcode) {
    assert_eq!(
        IntegerAlu.evaluate(opcode, 9, 0),
        Err(ExceptionCause::DivideByZero)
    );
}

#[test]
fn only_division_can_raise() {
    for opcode in Opcode::ALL {
        let raises = IntegerAlu.evaluate(opcode, 1, 0).is_err();
        assert_eq!(raises, matches!(opcode, Opcode::Divu | Opcode::Remu), "{opcode}");
    }
}

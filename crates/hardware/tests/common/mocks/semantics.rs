//! Mock Opcode Semantics.
//!
//! Functional units ask an `OpcodeSemantics` for every result. Swapping in
//! `MockSemantics` lets a test raise an exception from any opcode or count
//! how often the core evaluates.

use mockall::mock;
use r10k_core::common::ExceptionCause;
use r10k_core::core::units::alu::{IntegerAlu, OpcodeSemantics};
use r10k_core::isa::Opcode;

mock! {
    pub Semantics {}

    impl OpcodeSemantics for Semantics {
        fn evaluate(&self, opcode: Opcode, a: u64, b: u64) -> Result<u64, ExceptionCause>;
    }
}

/// A mock that computes real results but faults on every `faulting` opcode.
pub fn faulting_on(faulting: Opcode) -> MockSemantics {
    let mut mock = MockSemantics::new();
    let _ = mock.expect_evaluate().returning(move |opcode, a, b| {
        if opcode == faulting {
            Err(ExceptionCause::DivideByZero)
        } else {
            IntegerAlu.evaluate(opcode, a, b)
        }
    });
    mock
}

//! Simulator Driver Tests.
//!
//! Verifies the driver lifecycle:
//!   1. Termination states and their ordering.
//!   2. Stepping after termination changes nothing.
//!   3. Snapshots serialize with the documented field names.

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use r10k_core::common::ConsistencyViolation;
use r10k_core::config::Config;
use r10k_core::{Program, SimError, Simulator, Termination};

#[test]
fn stepping_after_completion_is_idempotent() {
    let mut ctx = TestContext::new(ProgramBuilder::new().addi(1, 0, 4).build());
    assert_eq!(ctx.run(), Termination::Completed);

    let cycle = ctx.sim.cycle();
    let snapshot = ctx.sim.snapshot();
    let stats = ctx.sim.stats().clone();
    for _ in 0..3 {
        assert_eq!(ctx.sim.step(), Ok(Some(Termination::Completed)));
    }
    assert_eq!(ctx.sim.cycle(), cycle);
    assert_eq!(ctx.sim.snapshot(), snapshot);
    assert_eq!(ctx.sim.stats(), &stats);
}

#[test]
fn stepping_after_exception_is_idempotent() {
    let mut ctx = TestContext::new(ProgramBuilder::new().remu(1, 1, 0).build());
    let outcome = ctx.run();
    assert!(matches!(outcome, Termination::Excepted(_)));
    let cycle = ctx.sim.cycle();
    assert_eq!(ctx.sim.step(), Ok(Some(outcome)));
    assert_eq!(ctx.sim.cycle(), cycle);
    assert_eq!(ctx.sim.termination(), Some(outcome));
}

#[test]
fn cycle_limit_is_reported() {
    let mut config = Config::default();
    config.general.max_cycles = 4;
    let program = ProgramBuilder::new().mulu(1, 1, 1).mulu(2, 1, 1).build();
    let mut ctx = TestContext::with_config(program, config);
    assert_eq!(ctx.run(), Termination::CycleLimit { cycles: 4 });
    assert_eq!(ctx.trace.len(), 5);
}

#[test]
fn empty_program_never_ticks() {
    let mut ctx = TestContext::new(Program::default());
    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!(ctx.sim.cycle(), 0);
    assert_eq!(ctx.trace.len(), 1);
}

#[test]
fn out_of_range_register_rejected() {
    let mut sim = Simulator::new(Program::default(), Config::default()).unwrap();
    assert_eq!(
        sim.set_register(32, 1),
        Err(SimError::Consistency(ConsistencyViolation::RegisterOutOfRange(32)))
    );
}

#[test]
fn snapshot_json_shape() {
    let program = ProgramBuilder::new().add(3, 1, 2).sub(4, 3, 1).build();
    let mut ctx = TestContext::new(program).with_regs(&[(1, 5), (2, 2)]);
    let _ = ctx.run();

    let json = serde_json::to_value(ctx.at_cycle(3)).unwrap();
    for key in [
        "Cycle",
        "PC",
        "DecodedPCs",
        "Exception",
        "ExceptionPC",
        "RegisterFile",
        "BusyBitTable",
        "RegisterMapTable",
        "ActiveList",
        "IntegerQueue",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["Cycle"], 3);
    assert_eq!(json["RegisterFile"][1], 5);
    assert_eq!(json["RegisterMapTable"][3], 0);
    assert!(json["RegisterMapTable"][0].is_null());
    assert_eq!(json["ActiveList"][1]["LogicalDestination"], 4);
    assert_eq!(json["IntegerQueue"][0]["OpCode"], "sub");
    assert_eq!(json["IntegerQueue"][0]["OpARegTag"], 0);
}

#[test]
fn independent_simulators_do_not_interfere() {
    let handles: Vec<_> = (0..4u64)
        .map(|n| {
            std::thread::spawn(move || {
                let program = ProgramBuilder::new().addi(1, 0, n as i64).mulu(2, 1, 1).build();
                let mut sim = Simulator::new(program, Config::default()).unwrap();
                let outcome = sim.run_to_completion().unwrap();
                (outcome, sim.renamer().registers().read(2))
            })
        })
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        let (outcome, value) = handle.join().unwrap();
        assert_eq!(outcome, Termination::Completed);
        assert_eq!(value, (n * n) as u64);
    }
}

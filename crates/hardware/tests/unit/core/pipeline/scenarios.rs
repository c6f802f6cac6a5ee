//! Pipeline Scenario Tests.
//!
//! Hand-traced programs checked cycle by cycle through the recorded snapshots:
//!   1. RAW dependency wakes the consumer on the producer's broadcast.
//!   2. Out-of-order completion, in-order commit.
//!   3. Backpressure from a full issue queue, active list and decode buffer.
//!   4. `x0` is an ordinary writable register.

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::{TestContext, reference_run};
use pretty_assertions::assert_eq;
use r10k_core::{Snapshot, Termination};
use r10k_core::config::Config;
use r10k_core::core::pipeline::active_list::Tag;
use rstest::rstest;

fn config_with(f: impl FnOnce(&mut Config)) -> Config {
    let mut config = Config::default();
    f(&mut config);
    config
}

fn queued_pcs(snap: &Snapshot) -> Vec<u64> {
    snap.integer_queue.iter().map(|q| q.pc).collect()
}

#[rstest]
#[case::narrow(1)]
#[case::wide(4)]
fn raw_dependency_waits_for_broadcast(#[case] dispatch_width: usize) {
    let program = ProgramBuilder::new().add(3, 1, 2).sub(4, 3, 1).build();
    let config = config_with(|c| c.pipeline.dispatch_width = dispatch_width);
    let mut ctx = TestContext::with_config(program, config).with_regs(&[(1, 5), (2, 2)]);

    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!(ctx.reg(3), 7);
    assert_eq!(ctx.reg(4), 2);

    // Add broadcasts in cycle 5; sub issues then and commits in cycle 8.
    assert_eq!(ctx.sim.cycle(), 8);
    let waiting = ctx.at_cycle(3).integer_queue.iter().find(|q| q.pc == 1);
    let waiting = waiting.expect("sub is in the issue queue after cycle 3");
    assert!(!waiting.op_a_is_ready);
    assert_eq!(waiting.op_a_reg_tag, Some(Tag(0)));
    assert!(waiting.op_b_is_ready);
    assert_eq!(waiting.op_b_value, Some(5));

    let done = &ctx.at_cycle(5).active_list[0];
    assert_eq!((done.tag, done.done), (Tag(0), true));
    assert!(!ctx.at_cycle(5).busy_bit_table[3]);
}

#[test]
fn single_add_commits_in_cycle_six() {
    let program = ProgramBuilder::new().add(1, 2, 3).build();
    let mut ctx = TestContext::new(program).with_regs(&[(2, 4), (3, 5)]);
    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!(ctx.sim.cycle(), 6);
    assert_eq!(ctx.reg(1), 9);

    assert_eq!(ctx.at_cycle(1).decoded_pcs, vec![0]);
    assert_eq!(ctx.at_cycle(1).pc, 1);
    assert!(ctx.at_cycle(2).busy_bit_table[1]);
    assert_eq!(ctx.at_cycle(2).register_map_table[1], Some(Tag(0)));
    assert!(ctx.at_cycle(6).active_list.is_empty());
    assert_eq!(ctx.at_cycle(6).register_map_table[1], None);
}

#[test]
fn younger_completes_first_but_commits_in_order() {
    let program = ProgramBuilder::new().mulu(1, 2, 2).add(3, 2, 2).build();
    let mut ctx = TestContext::new(program).with_regs(&[(2, 3)]);
    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!((ctx.reg(1), ctx.reg(3)), (9, 6));

    let overtaken = ctx.trace.iter().any(|s| {
        matches!(
            s.active_list.as_slice(),
            [head, next] if !head.done && next.done
        )
    });
    assert!(overtaken, "add should complete while mulu is still in flight");
    for snap in &ctx.trace {
        if snap.register_file[3] == 6 {
            assert_eq!(snap.register_file[1], 9, "cycle {}", snap.cycle);
        }
    }
}

#[test]
fn full_issue_queue_stalls_dispatch() {
    let program = ProgramBuilder::new()
        .divu(1, 2, 3)
        .add(4, 1, 1)
        .add(5, 1, 1)
        .add(6, 1, 1)
        .build();
    let config = config_with(|c| c.pipeline.issue_queue_size = 2);
    let mut ctx = TestContext::with_config(program, config).with_regs(&[(2, 6), (3, 3)]);

    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!(ctx.reg(1), 2);
    assert_eq!([ctx.reg(4), ctx.reg(5), ctx.reg(6)], [4, 4, 4]);

    let c2 = ctx.at_cycle(2);
    assert_eq!(c2.integer_queue.len(), 2);
    assert_eq!(c2.decoded_pcs, vec![2, 3]);
    // Divu issues in cycle 3 and its slot is refilled by pc 2 the same cycle.
    let c3 = ctx.at_cycle(3);
    assert_eq!(queued_pcs(c3), vec![1, 2]);
    assert_eq!(c3.decoded_pcs, vec![3]);
    assert!(ctx.sim.stats().stalls_issue_queue_full > 0);
    assert!(ctx.trace.iter().all(|s| s.integer_queue.len() <= 2));
}

#[test]
fn stalled_instruction_dispatches_when_queue_frees() {
    let program = ProgramBuilder::new().add(1, 0, 0).add(2, 0, 0).build();
    let config = config_with(|c| c.pipeline.issue_queue_size = 1);
    let mut ctx = TestContext::with_config(program, config);
    assert_eq!(ctx.run(), Termination::Completed);

    let c2 = ctx.at_cycle(2);
    assert_eq!(queued_pcs(c2), vec![0]);
    assert_eq!(c2.decoded_pcs, vec![1]);
    let c3 = ctx.at_cycle(3);
    assert_eq!(queued_pcs(c3), vec![1]);
    assert!(c3.decoded_pcs.is_empty());
    assert_eq!(ctx.sim.stats().stalls_issue_queue_full, 1);
}

#[test]
fn full_active_list_stalls_dispatch() {
    let program = ProgramBuilder::new()
        .addi(1, 0, 1)
        .addi(2, 0, 2)
        .addi(3, 0, 3)
        .addi(4, 0, 4)
        .build();
    let config = config_with(|c| c.pipeline.active_list_size = 2);
    let mut ctx = TestContext::with_config(program, config);

    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!(
        [ctx.reg(1), ctx.reg(2), ctx.reg(3), ctx.reg(4)],
        [1, 2, 3, 4]
    );
    assert!(ctx.sim.stats().stalls_active_list_full > 0);
    assert!(ctx.trace.iter().all(|s| s.active_list.len() <= 2));
}

#[test]
fn small_decode_buffer_throttles_fetch() {
    let program = ProgramBuilder::new().addi(1, 0, 1).addi(2, 0, 2).addi(3, 0, 3).build();
    let config = config_with(|c| c.pipeline.decode_buffer_size = 1);
    let mut ctx = TestContext::with_config(program, config);

    assert_eq!(ctx.run(), Termination::Completed);
    assert!(ctx.trace.iter().all(|s| s.decoded_pcs.len() <= 1));
    assert!(ctx.sim.stats().stalls_decode_buffer_full > 0);
    assert_eq!(ctx.sim.stats().instructions_committed, 3);
}

#[test]
fn zero_register_is_writable() {
    let program = ProgramBuilder::new().addi(0, 0, 5).add(1, 0, 0).build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!((ctx.reg(0), ctx.reg(1)), (5, 10));
    assert_eq!(reference_run(ctx.sim.program(), &[]).regs[1], 10);
}

#[test]
fn long_dependency_chain() {
    let mut builder = ProgramBuilder::new().addi(1, 0, 1);
    for _ in 0..20 {
        builder = builder.add(1, 1, 1);
    }
    let mut ctx = TestContext::new(builder.build());
    assert_eq!(ctx.run(), Termination::Completed);
    assert_eq!(ctx.reg(1), 1 << 20);
    assert_eq!(ctx.sim.stats().instructions_committed, 21);
}

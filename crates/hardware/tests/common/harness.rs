//! Simulator Test Harness.
//!
//! `TestContext` wraps a `Simulator`, records the snapshot after every
//! executed cycle, and exposes the committed register file. The
//! `reference_run` interpreter executes the same program strictly in order
//! and is the oracle the out-of-order core must agree with.

use r10k_core::common::NUM_ARCH_REGS;
use r10k_core::config::Config;
use r10k_core::core::units::alu::{IntegerAlu, OpcodeSemantics};
use r10k_core::isa::Opcode;
use r10k_core::{Program, SimError, Simulator, Snapshot, Termination};

/// Installs a test-writer subscriber once per process; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext<S = IntegerAlu> {
    pub sim: Simulator<S>,
    /// Initial state followed by one snapshot per executed cycle.
    pub trace: Vec<Snapshot>,
}

impl TestContext<IntegerAlu> {
    pub fn new(program: Program) -> Self {
        Self::with_config(program, Config::default())
    }

    pub fn with_config(program: Program, config: Config) -> Self {
        Self::with_semantics(program, config, IntegerAlu)
    }
}

impl<S: OpcodeSemantics> TestContext<S> {
    pub fn with_semantics(program: Program, config: Config, semantics: S) -> Self {
        init_tracing();
        let sim = Simulator::with_semantics(program, config, semantics)
            .expect("test configuration must be valid");
        let trace = vec![sim.snapshot()];
        Self { sim, trace }
    }

    /// Presets committed registers before the first cycle.
    pub fn with_regs(mut self, regs: &[(usize, u64)]) -> Self {
        for &(reg, value) in regs {
            self.sim.set_register(reg, value).expect("register in range");
        }
        self.trace[0] = self.sim.snapshot();
        self
    }

    /// Advances one cycle, recording a snapshot if the clock moved.
    pub fn step(&mut self) -> Result<Option<Termination>, SimError> {
        let before = self.sim.cycle();
        let outcome = self.sim.step()?;
        if self.sim.cycle() != before {
            self.trace.push(self.sim.snapshot());
        }
        Ok(outcome)
    }

    /// Steps to termination, panicking on a consistency violation.
    pub fn run(&mut self) -> Termination {
        loop {
            match self.step() {
                Ok(Some(outcome)) => return outcome,
                Ok(None) => {}
                Err(e) => panic!("simulator halted at cycle {}: {e}", self.sim.cycle()),
            }
        }
    }

    /// Committed value of architectural register `reg`.
    pub fn reg(&self, reg: usize) -> u64 {
        self.sim.renamer().registers().read(reg)
    }

    /// Snapshot recorded at the end of `cycle`.
    pub fn at_cycle(&self, cycle: u64) -> &Snapshot {
        self.trace
            .iter()
            .find(|s| s.cycle == cycle)
            .unwrap_or_else(|| panic!("no snapshot for cycle {cycle}"))
    }
}

/// Outcome of the in-order reference interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOutcome {
    /// Architectural registers after the last instruction that completed.
    pub regs: [u64; NUM_ARCH_REGS],
    /// PC of the first instruction that raised an exception.
    pub exception_pc: Option<u64>,
}

/// Executes `program` strictly in order, stopping at the first exception.
pub fn reference_run(program: &Program, init: &[(usize, u64)]) -> ReferenceOutcome {
    let mut regs = [0u64; NUM_ARCH_REGS];
    for &(reg, value) in init {
        regs[reg] = value;
    }
    for inst in program.instructions() {
        let read = |src: Option<usize>| src.map_or(0, |r| regs[r]);
        let a = read(inst.sources[0]);
        let b = inst.imm.unwrap_or_else(|| read(inst.sources[1]));
        let result = match inst.opcode {
            Opcode::Add | Opcode::Addi => Some(a.wrapping_add(b)),
            Opcode::Sub => Some(a.wrapping_sub(b)),
            Opcode::Mulu => Some(a.wrapping_mul(b)),
            Opcode::Divu => a.checked_div(b),
            Opcode::Remu => a.checked_rem(b),
        };
        match result {
            Some(value) => {
                if let Some(rd) = inst.dest {
                    regs[rd] = value;
                }
            }
            None => {
                return ReferenceOutcome {
                    regs,
                    exception_pc: Some(inst.pc),
                };
            }
        }
    }
    ReferenceOutcome {
        regs,
        exception_pc: None,
    }
}

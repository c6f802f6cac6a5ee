//! Simulator: owns the program, the pipeline and the cycle clock side-by-side.
//!
//! The clock is an explicit counter threaded through `step()`, so independent
//! simulators can run in parallel test threads.
//!
//! Lifecycle:
//! 1. **Construct:** validate the configuration and build an empty pipeline.
//! 2. **Step:** advance one cycle, then cross-check every structure.
//! 3. **Terminate:** once drained (or at the cycle limit) further steps are no-ops.
//! 4. **Fault:** a consistency violation halts the run; every later step repeats it.

use std::fmt;

use tracing::{debug, error, warn};

use crate::common::error::{ConsistencyViolation, SimError};
use crate::config::Config;
use crate::core::pipeline::active_list::ActiveList;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::DecodeBuffer;
use crate::core::pipeline::recovery::ExceptionRecord;
use crate::core::pipeline::renamer::Renamer;
use crate::core::units::UnitPool;
use crate::core::units::alu::{IntegerAlu, OpcodeSemantics};
use crate::isa::Program;
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every instruction committed and no exception was taken.
    Completed,
    /// The pipeline drained after taking at least one precise exception.
    Excepted(ExceptionRecord),
    /// The safety cycle limit was reached first.
    CycleLimit {
        /// Cycles executed.
        cycles: u64,
    },
}

/// Top-level simulator: program + pipeline + clock.
pub struct Simulator<S = IntegerAlu> {
    program: Program,
    config: Config,
    pipeline: Pipeline,
    semantics: S,
    stats: SimStats,
    cycle: u64,
    outcome: Option<Termination>,
    fault: Option<ConsistencyViolation>,
}

impl Simulator<IntegerAlu> {
    /// Creates a simulator using the built-in integer semantics.
    ///
    /// # Errors
    ///
    /// `SimError::Config` if the configuration is invalid.
    pub fn new(program: Program, config: Config) -> Result<Self, SimError> {
        Self::with_semantics(program, config, IntegerAlu)
    }
}

impl<S: OpcodeSemantics> Simulator<S> {
    /// Creates a simulator with caller-supplied opcode semantics.
    ///
    /// # Errors
    ///
    /// `SimError::Config` if the configuration is invalid.
    pub fn with_semantics(program: Program, config: Config, semantics: S) -> Result<Self, SimError> {
        config.validate()?;
        let pipeline = Pipeline::new(&config);
        Ok(Self {
            program,
            config,
            pipeline,
            semantics,
            stats: SimStats::default(),
            cycle: 0,
            outcome: None,
            fault: None,
        })
    }

    /// Sets a committed register value, normally before the first step.
    ///
    /// # Errors
    ///
    /// `SimError::Consistency` if `reg` is not an architectural register.
    pub fn set_register(&mut self, reg: usize, value: u64) -> Result<(), SimError> {
        self.pipeline.renamer.set_register(reg, value)?;
        Ok(())
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// Returns `Some` once the run has terminated. After termination the
    /// state is frozen: further calls change nothing and return the same value.
    ///
    /// # Errors
    ///
    /// `SimError::Consistency` on an internal inconsistency. The simulator is
    /// halted and every later call returns the same error.
    pub fn step(&mut self) -> Result<Option<Termination>, SimError> {
        if let Some(violation) = &self.fault {
            return Err(violation.clone().into());
        }
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }
        if self.pipeline.is_drained(&self.program) {
            return Ok(Some(self.finish()));
        }
        if self.cycle >= self.config.general.max_cycles {
            warn!(cycles = self.cycle, "cycle limit reached");
            let outcome = Termination::CycleLimit { cycles: self.cycle };
            self.outcome = Some(outcome);
            return Ok(Some(outcome));
        }

        self.cycle += 1;
        self.stats.cycles = self.cycle;
        debug!(cycle = self.cycle, pc = self.pipeline.frontend.pc, "cycle");

        let result = self
            .pipeline
            .tick(self.cycle, &self.program, &self.semantics, &mut self.stats)
            .and_then(|()| self.pipeline.check_invariants());
        if let Err(violation) = result {
            error!(cycle = self.cycle, %violation, "simulator halted");
            self.fault = Some(violation.clone());
            return Err(violation.into());
        }

        if self.pipeline.is_drained(&self.program) {
            return Ok(Some(self.finish()));
        }
        Ok(None)
    }

    fn finish(&mut self) -> Termination {
        let outcome = self
            .pipeline
            .last_exception
            .map_or(Termination::Completed, Termination::Excepted);
        debug!(cycle = self.cycle, ?outcome, "simulation finished");
        self.outcome = Some(outcome);
        outcome
    }

    /// Steps until termination or the configured cycle limit.
    ///
    /// # Errors
    ///
    /// The first error returned by `step()`.
    pub fn run_to_completion(&mut self) -> Result<Termination, SimError> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Copies the observable state after the current cycle.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.cycle, &self.pipeline)
    }

    /// Cycles executed so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Next fetch address.
    pub const fn pc(&self) -> u64 {
        self.pipeline.frontend.pc
    }

    /// Fetched instructions awaiting dispatch.
    pub const fn decode_buffer(&self) -> &DecodeBuffer {
        &self.pipeline.frontend.decode_buffer
    }

    /// The active list.
    pub const fn active_list(&self) -> &ActiveList {
        &self.pipeline.active_list
    }

    /// The issue queue.
    pub const fn issue_queue(&self) -> &IssueQueue {
        &self.pipeline.issue_queue
    }

    /// Map table and committed registers.
    pub const fn renamer(&self) -> &Renamer {
        &self.pipeline.renamer
    }

    /// Functional units.
    pub const fn units(&self) -> &UnitPool {
        &self.pipeline.units
    }

    /// The whole pipeline.
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Accumulated statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Most recent precise exception.
    pub const fn last_exception(&self) -> Option<ExceptionRecord> {
        self.pipeline.last_exception
    }

    /// Whether the core is rolling back an exception.
    pub const fn in_recovery(&self) -> bool {
        self.pipeline.recovery.is_recovering()
    }

    /// Termination reason, once terminated.
    pub const fn termination(&self) -> Option<Termination> {
        self.outcome
    }

    /// The program being executed.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// The validated configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl<S> fmt::Debug for Simulator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cycle", &self.cycle)
            .field("pc", &self.pipeline.frontend.pc)
            .field("in_flight", &self.pipeline.active_list.len())
            .field("outcome", &self.outcome)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

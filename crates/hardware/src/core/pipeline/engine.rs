//! Out-of-order execution engine.
//!
//! The `Pipeline` owns every structure of the core and advances them one clock
//! edge per `tick`. Stages run in reverse pipeline order so that each stage
//! observes the structures as the later stages left them this cycle:
//! 1. **Rollback:** while recovering, only the rollback controller runs.
//! 2. **Commit:** retires completed entries from the active-list head.
//! 3. **Exception check:** an excepting head squashes all in-flight work.
//! 4. **Writeback:** broadcasts results latched by the previous cycle's Execute.
//! 5. **Execute → Issue → Dispatch → Fetch.**
//!
//! A result computed in Execute is broadcast only in the following cycle, so no
//! value reaches a dependent that issues in the same cycle it was produced.

use tracing::debug;

use crate::common::error::ConsistencyViolation;
use crate::config::Config;
use crate::core::pipeline::active_list::{ActiveList, Tag};
use crate::core::pipeline::frontend::Frontend;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::CompletionLatch;
use crate::core::pipeline::recovery::{ExceptionRecord, RollbackController};
use crate::core::pipeline::renamer::Renamer;
use crate::core::pipeline::stages::{
    commit_stage, dispatch_stage, execute_stage, fetch_stage, issue_stage, writeback_stage,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::UnitPool;
use crate::core::units::alu::OpcodeSemantics;
use crate::isa::Program;
use crate::stats::SimStats;

/// The full out-of-order pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Program counter and decode buffer.
    pub frontend: Frontend,
    /// Map table and committed registers.
    pub renamer: Renamer,
    /// Reorder buffer.
    pub active_list: ActiveList,
    /// Scheduling window.
    pub issue_queue: IssueQueue,
    /// Functional units.
    pub units: UnitPool,
    /// Results waiting for next cycle's broadcast.
    pub completions: CompletionLatch,
    /// Exception rollback state.
    pub recovery: RollbackController,
    /// Most recent precise exception.
    pub last_exception: Option<ExceptionRecord>,
    fetch_width: usize,
    dispatch_width: usize,
    commit_width: usize,
    handler_pc: u64,
    trace: bool,
}

impl Pipeline {
    /// Builds an empty pipeline sized by `config`.
    pub fn new(config: &Config) -> Self {
        let p = &config.pipeline;
        Self {
            frontend: Frontend::new(p.decode_buffer_size),
            renamer: Renamer::new(),
            active_list: ActiveList::new(p.active_list_size),
            issue_queue: IssueQueue::new(p.issue_queue_size),
            units: UnitPool::new(p),
            completions: CompletionLatch::default(),
            recovery: RollbackController::new(p.rollback_width),
            last_exception: None,
            fetch_width: p.fetch_width,
            dispatch_width: p.dispatch_width,
            commit_width: p.commit_width,
            handler_pc: config.general.exception_handler_pc,
            trace: config.general.trace_instructions,
        }
    }

    /// Run one cycle of the entire pipeline.
    ///
    /// # Errors
    ///
    /// Any `ConsistencyViolation` raised by a stage; the pipeline state is
    /// then unspecified and the caller must halt.
    pub fn tick<S: OpcodeSemantics>(
        &mut self,
        cycle: u64,
        program: &Program,
        semantics: &S,
        stats: &mut SimStats,
    ) -> Result<(), ConsistencyViolation> {
        let trace = self.trace;

        if self.recovery.is_recovering() {
            stats.rollback_cycles += 1;
            let progress = self
                .recovery
                .step(&mut self.active_list, &mut self.renamer, trace)?;
            stats.instructions_squashed += progress.squashed as u64;
            return Ok(());
        }

        let committed = commit_stage(
            &mut self.active_list,
            &mut self.renamer,
            self.commit_width,
            stats,
            trace,
        )?;

        if let Some(head) = self.active_list.peek_head()
            && head.is_completed()
            && let Some(cause) = head.exception
        {
            let record = ExceptionRecord {
                pc: head.pc,
                tag: head.tag,
                cause,
                cycle,
            };
            return self.take_exception(record, stats);
        }

        let broadcast = writeback_stage(
            &mut self.completions,
            &mut self.active_list,
            &mut self.issue_queue,
            &mut self.renamer,
            stats,
            trace,
        )?;
        let executed = execute_stage(&mut self.units, semantics, &mut self.completions, trace);
        let issued = issue_stage(
            &mut self.issue_queue,
            &mut self.units,
            &self.active_list,
            stats,
            trace,
        )?;
        let dispatched = dispatch_stage(
            &mut self.frontend.decode_buffer,
            &mut self.renamer,
            &mut self.active_list,
            &mut self.issue_queue,
            self.dispatch_width,
            stats,
            trace,
        )?;
        let fetched = fetch_stage(&mut self.frontend, program, self.fetch_width, stats, trace);
        debug!(
            cycle,
            committed,
            broadcast,
            executed,
            issued,
            dispatched,
            fetched,
            "stage counts"
        );
        Ok(())
    }

    /// Squashes all in-flight work behind an excepting head and starts rollback.
    fn take_exception(
        &mut self,
        record: ExceptionRecord,
        stats: &mut SimStats,
    ) -> Result<(), ConsistencyViolation> {
        stats.exceptions_taken += 1;

        // Every live entry is at or after the excepting head.
        self.issue_queue.flush();
        let cancelled = self.units.flush();
        self.completions.flush();
        debug!(
            pc = record.pc,
            tag = record.tag.0,
            cause = %record.cause,
            cycle = record.cycle,
            cancelled,
            "precise exception"
        );
        let _ = self.frontend.redirect(self.handler_pc);

        self.last_exception = Some(record);
        self.recovery.begin(record.tag);
        if self.recovery.is_atomic() {
            let progress = self
                .recovery
                .step(&mut self.active_list, &mut self.renamer, self.trace)?;
            stats.instructions_squashed += progress.squashed as u64;
        }
        Ok(())
    }

    /// True once nothing is left to fetch and every structure is empty.
    pub fn is_drained(&self, program: &Program) -> bool {
        program.fetch(self.frontend.pc).is_none()
            && self.frontend.decode_buffer.is_empty()
            && self.active_list.is_empty()
            && self.issue_queue.is_empty()
            && self.units.is_idle()
            && self.completions.is_empty()
            && !self.recovery.is_recovering()
    }

    /// Cross-checks every structure against the active list.
    ///
    /// # Errors
    ///
    /// The first `ConsistencyViolation` found.
    pub fn check_invariants(&self) -> Result<(), ConsistencyViolation> {
        let buffer = &self.frontend.decode_buffer;
        check_capacity("decode buffer", buffer.len(), buffer.capacity())?;
        check_capacity(
            "issue queue",
            self.issue_queue.len(),
            self.issue_queue.capacity(),
        )?;
        self.active_list.check_integrity()?;

        let live = |structure: &'static str, tag: Tag| {
            if self.active_list.contains(tag) {
                Ok(())
            } else {
                Err(ConsistencyViolation::OrphanTag { structure, tag })
            }
        };

        let mut seen: Vec<Tag> = Vec::with_capacity(self.issue_queue.len());
        for entry in self.issue_queue.iter() {
            live("issue queue", entry.tag)?;
            if seen.contains(&entry.tag) {
                return Err(ConsistencyViolation::TagCollision(entry.tag));
            }
            seen.push(entry.tag);
        }
        for flight in self.units.in_flight() {
            live("functional units", flight.op.tag)?;
        }
        self.units.check_routing()?;
        for completion in self.completions.iter() {
            live("completion latch", completion.tag)?;
        }
        if !self.recovery.is_recovering() {
            for mapping in self.renamer.map_table().entries() {
                if let Some(tag) = mapping.producer() {
                    live("map table", tag)?;
                }
            }
        }
        Ok(())
    }
}

const fn check_capacity(
    structure: &'static str,
    len: usize,
    capacity: usize,
) -> Result<(), ConsistencyViolation> {
    if len > capacity {
        Err(ConsistencyViolation::CapacityExceeded {
            structure,
            len,
            capacity,
        })
    } else {
        Ok(())
    }
}

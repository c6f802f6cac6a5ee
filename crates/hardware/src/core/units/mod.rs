//! Execution units.
//!
//! This module contains the functional-unit pool and the opcode semantics the
//! units evaluate. Units are fixed-latency and non-pipelined: each holds at
//! most one operation, counting down its latency, and produces a tagged
//! completion on the cycle it finishes.

/// Arithmetic semantics for the integer subset.
pub mod alu;

use crate::common::error::{ConsistencyViolation, StructuralHazard};
use crate::config::PipelineConfig;
use crate::core::pipeline::latches::{Completion, IssuedOp};
use crate::isa::UnitClass;

use self::alu::OpcodeSemantics;

/// An operation occupying a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// The operation being executed.
    pub op: IssuedOp,
    /// Execute cycles left before completion.
    pub remaining: u64,
}

/// A single non-pipelined functional unit.
#[derive(Clone, Debug)]
pub struct FunctionalUnit {
    class: UnitClass,
    latency: u64,
    busy: Option<InFlight>,
}

impl FunctionalUnit {
    /// Creates an idle unit.
    pub const fn new(class: UnitClass, latency: u64) -> Self {
        Self {
            class,
            latency,
            busy: None,
        }
    }

    /// Whether the unit can accept an operation.
    #[inline]
    pub const fn is_free(&self) -> bool {
        self.busy.is_none()
    }

    /// Operation currently executing.
    #[inline]
    pub const fn in_flight(&self) -> Option<&InFlight> {
        self.busy.as_ref()
    }

    /// Advances one cycle; evaluates and frees the unit when the latency elapses.
    fn tick<S: OpcodeSemantics>(&mut self, semantics: &S) -> Option<Completion> {
        let flight = self.busy.as_mut()?;
        flight.remaining = flight.remaining.saturating_sub(1);
        if flight.remaining > 0 {
            return None;
        }
        let op = flight.op;
        self.busy = None;
        let (value, exception) = match semantics.evaluate(op.opcode, op.a, op.b) {
            Ok(value) => (value, None),
            Err(cause) => (0, Some(cause)),
        };
        Some(Completion {
            tag: op.tag,
            value,
            exception,
        })
    }
}

/// All functional units of the core.
#[derive(Clone, Debug)]
pub struct UnitPool {
    units: Vec<FunctionalUnit>,
}

impl UnitPool {
    /// Builds the pool described by the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        let alu = (0..config.alu_units)
            .map(|_| FunctionalUnit::new(UnitClass::Alu, config.alu_latency));
        let muldiv = (0..config.muldiv_units)
            .map(|_| FunctionalUnit::new(UnitClass::MulDiv, config.muldiv_latency));
        Self {
            units: alu.chain(muldiv).collect(),
        }
    }

    /// Number of idle units of `class`.
    pub fn free_units(&self, class: UnitClass) -> usize {
        self.units
            .iter()
            .filter(|u| u.class == class && u.is_free())
            .count()
    }

    /// Idle units per class, indexed by `UnitClass::index`.
    pub fn free_per_class(&self) -> [usize; UnitClass::ALL.len()] {
        UnitClass::ALL.map(|class| self.free_units(class))
    }

    /// Starts `op` on an idle unit of its class.
    ///
    /// # Errors
    ///
    /// `StructuralHazard::NoFreeUnit` when every unit of the class is busy.
    pub fn accept(&mut self, op: IssuedOp) -> Result<(), StructuralHazard> {
        let class = op.opcode.unit_class();
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.class == class && u.is_free())
            .ok_or(StructuralHazard::NoFreeUnit(class))?;
        unit.busy = Some(InFlight {
            op,
            remaining: unit.latency,
        });
        Ok(())
    }

    /// Advances every unit one cycle and returns the completions, oldest unit first.
    pub fn tick<S: OpcodeSemantics>(&mut self, semantics: &S) -> Vec<Completion> {
        self.units
            .iter_mut()
            .filter_map(|u| u.tick(semantics))
            .collect()
    }

    /// Cancels every in-flight operation. Returns operations cancelled.
    pub fn flush(&mut self) -> usize {
        self.units
            .iter_mut()
            .filter_map(|u| u.busy.take())
            .count()
    }

    /// Returns true when no unit is busy.
    pub fn is_idle(&self) -> bool {
        self.units.iter().all(FunctionalUnit::is_free)
    }

    /// In-flight operations.
    pub fn in_flight(&self) -> impl Iterator<Item = &InFlight> {
        self.units.iter().filter_map(FunctionalUnit::in_flight)
    }

    /// Verifies every in-flight operation sits on a unit of its own class.
    ///
    /// # Errors
    ///
    /// `WrongUnitClass` naming the misrouted opcode.
    pub fn check_routing(&self) -> Result<(), ConsistencyViolation> {
        for unit in &self.units {
            if let Some(f) = unit.in_flight()
                && f.op.opcode.unit_class() != unit.class
            {
                return Err(ConsistencyViolation::WrongUnitClass(f.op.opcode, unit.class));
            }
        }
        Ok(())
    }
}

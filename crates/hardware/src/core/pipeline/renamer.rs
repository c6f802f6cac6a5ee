//! Register renaming layer.
//!
//! Pairs the map table with the committed register file. There is no physical
//! register file: a source operand is either a concrete value or the tag whose
//! broadcast will deliver it.

use crate::common::error::ConsistencyViolation;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::active_list::{ActiveList, Tag};
use crate::core::pipeline::issue_queue::Operand;
use crate::core::pipeline::map_table::{MapTable, Mapping};

/// Map table plus committed register state.
#[derive(Clone, Debug, Default)]
pub struct Renamer {
    map: MapTable,
    regs: RegisterFile,
}

impl Renamer {
    /// Creates a renamer with every register ready and zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a source register at dispatch time.
    pub fn rename_lookup(&self, reg: usize) -> Operand {
        match self.map.get(reg) {
            Mapping::Ready => Operand::Ready(self.regs.read(reg)),
            Mapping::Pending {
                value: Some(value), ..
            } => Operand::Ready(value),
            Mapping::Pending { tag, value: None } => Operand::Waiting(tag),
        }
    }

    /// Makes `tag` the latest producer of `reg`; returns the replaced binding.
    pub fn rename_bind(&mut self, reg: usize, tag: Tag) -> Mapping {
        self.map.bind(reg, tag)
    }

    /// Records a broadcast result for the destination of `tag`.
    pub fn record_broadcast(&mut self, reg: usize, tag: Tag, value: u64) -> bool {
        self.map.stage_value(reg, tag, value)
    }

    /// Writes a committed value and releases the mapping if `tag` still owns it.
    pub fn commit_register(&mut self, reg: usize, tag: Tag, value: u64) {
        self.regs.write(reg, value);
        self.map.clear_if_match(reg, tag);
    }

    /// Undoes one dispatch during rollback.
    pub fn restore(&mut self, reg: usize, mapping: Mapping) {
        self.map.restore(reg, mapping);
    }

    /// Normalizes mappings against the live window after a rollback.
    ///
    /// A restored producer that is no longer in flight has already committed
    /// its value to the register file, so the mapping falls back to `Ready`.
    /// A restored producer that already completed gets its result staged.
    pub fn release_dead(&mut self, active_list: &ActiveList) {
        self.map.for_each_mut(|_, mapping| {
            if let Mapping::Pending { tag, value } = mapping {
                match active_list.get(*tag) {
                    None => *mapping = Mapping::Ready,
                    Some(e) if e.is_completed() && value.is_none() => *value = Some(e.result),
                    Some(_) => {}
                }
            }
        });
    }

    /// Sets a committed register value before the run starts.
    ///
    /// # Errors
    ///
    /// `RegisterOutOfRange` if `reg` is not an architectural register.
    pub fn set_register(&mut self, reg: usize, value: u64) -> Result<(), ConsistencyViolation> {
        if !RegisterFile::contains(reg) {
            return Err(ConsistencyViolation::RegisterOutOfRange(reg));
        }
        self.regs.write(reg, value);
        Ok(())
    }

    /// The map table.
    pub const fn map_table(&self) -> &MapTable {
        &self.map
    }

    /// The committed register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }
}

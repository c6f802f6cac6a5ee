//! Tag-based register map table.
//!
//! Maps each architectural register to the tag of its latest in-flight
//! producer, or to `Ready` if the value is in the architectural register file.
//! Once the producer's result is broadcast the value is staged in the mapping
//! so later readers no longer wait on the tag.

use crate::common::constants::NUM_ARCH_REGS;
use crate::core::pipeline::active_list::Tag;

/// Renaming state of one architectural register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mapping {
    /// The committed register file holds the current value.
    #[default]
    Ready,
    /// The value will be produced by the in-flight instruction `tag`.
    Pending {
        /// Latest in-flight producer.
        tag: Tag,
        /// Result of `tag`, once broadcast.
        value: Option<u64>,
    },
}

impl Mapping {
    /// Producer tag, if the register is renamed.
    #[inline]
    pub const fn producer(self) -> Option<Tag> {
        match self {
            Self::Ready => None,
            Self::Pending { tag, .. } => Some(tag),
        }
    }

    /// True while the producer's result has not been broadcast.
    #[inline]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Pending { value: None, .. })
    }
}

/// Register map table: one `Mapping` per architectural register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapTable {
    entries: [Mapping; NUM_ARCH_REGS],
}

impl Default for MapTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MapTable {
    /// Create a new map table with all registers ready.
    pub const fn new() -> Self {
        Self {
            entries: [Mapping::Ready; NUM_ARCH_REGS],
        }
    }

    /// Current mapping of `reg`. Out-of-range registers read as ready.
    #[inline]
    pub fn get(&self, reg: usize) -> Mapping {
        self.entries.get(reg).copied().unwrap_or_default()
    }

    /// Tag of the latest pending writer for a register.
    #[inline]
    pub fn producer(&self, reg: usize) -> Option<Tag> {
        self.get(reg).producer()
    }

    /// Records `tag` as the latest producer of `reg` and returns the mapping it
    /// replaced.
    pub fn bind(&mut self, reg: usize, tag: Tag) -> Mapping {
        self.entries.get_mut(reg).map_or(Mapping::Ready, |slot| {
            std::mem::replace(slot, Mapping::Pending { tag, value: None })
        })
    }

    /// Stages `value` for `reg`, but ONLY if `tag` is still its producer.
    ///
    /// Returns whether the value was staged.
    pub fn stage_value(&mut self, reg: usize, tag: Tag, value: u64) -> bool {
        match self.entries.get_mut(reg) {
            Some(Mapping::Pending { tag: t, value: v }) if *t == tag => {
                *v = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Clear a register's pending writer, but ONLY if the current tag matches.
    /// This prevents a committing instruction from clearing a tag set by a
    /// newer rename (WAW handling).
    pub fn clear_if_match(&mut self, reg: usize, tag: Tag) {
        if let Some(slot) = self.entries.get_mut(reg)
            && slot.producer() == Some(tag)
        {
            *slot = Mapping::Ready;
        }
    }

    /// Puts back a mapping captured at dispatch time.
    pub fn restore(&mut self, reg: usize, mapping: Mapping) {
        if let Some(slot) = self.entries.get_mut(reg) {
            *slot = mapping;
        }
    }

    /// Rewrites every mapping in place.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(usize, &mut Mapping)) {
        for (reg, slot) in self.entries.iter_mut().enumerate() {
            f(reg, slot);
        }
    }

    /// All mappings, indexed by register number.
    pub fn entries(&self) -> &[Mapping] {
        &self.entries
    }
}

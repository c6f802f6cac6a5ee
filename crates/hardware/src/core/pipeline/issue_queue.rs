//! Issue queue: out-of-order scheduling with operand tracking.
//!
//! Dispatched instructions wait here until both operands are ready. Each cycle
//! the oldest ready entries of each functional-unit class are selected, up to
//! the number of free units of that class, and leave the queue atomically.
//! Broadcast wakeups fill in operands that were waiting on a tag.

use crate::common::error::StructuralHazard;
use crate::core::pipeline::active_list::Tag;
use crate::core::pipeline::latches::IssuedOp;
use crate::isa::{Opcode, UnitClass};

/// A source operand of an issue-queue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value available.
    Ready(u64),
    /// Waiting for the broadcast of `Tag`.
    Waiting(Tag),
}

impl Operand {
    /// Whether the value is available.
    #[inline]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Value, if ready.
    #[inline]
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Waiting(_) => None,
        }
    }

    /// Producer tag, if waiting.
    #[inline]
    pub const fn tag(self) -> Option<Tag> {
        match self {
            Self::Ready(_) => None,
            Self::Waiting(t) => Some(t),
        }
    }
}

/// An instruction waiting in the issue queue.
///
/// The destination tag is the entry's own tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueQueueEntry {
    /// Owning active-list slot.
    pub tag: Tag,
    /// Program counter.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Source operands A and B.
    pub operands: [Operand; 2],
}

impl IssueQueueEntry {
    /// Eligible for issue iff both operands are ready.
    pub fn is_ready(&self) -> bool {
        self.operands.iter().all(|op| op.is_ready())
    }

    /// Converts a ready entry into a unit operation.
    pub fn to_issued(&self) -> Option<IssuedOp> {
        let [a, b] = self.operands;
        Some(IssuedOp {
            tag: self.tag,
            pc: self.pc,
            opcode: self.opcode,
            a: a.value()?,
            b: b.value()?,
        })
    }
}

/// Issue queue with fixed capacity `I`.
#[derive(Clone, Debug)]
pub struct IssueQueue {
    entries: Vec<IssueQueueEntry>,
    capacity: usize,
}

impl IssueQueue {
    /// Creates an empty queue.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Capacity `I`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupancy.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if occupancy equals capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Inserts a dispatched instruction.
    ///
    /// # Errors
    ///
    /// `StructuralHazard::IssueQueueFull` at capacity.
    pub fn dispatch(&mut self, entry: IssueQueueEntry) -> Result<(), StructuralHazard> {
        if self.is_full() {
            return Err(StructuralHazard::IssueQueueFull);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Selects and removes the oldest ready entries per unit class.
    ///
    /// `free` gives the number of idle units per class (indexed by
    /// `UnitClass::index`); `age` orders entries by program order. Returned
    /// operations are oldest first within each class.
    pub fn select_ready(
        &mut self,
        free: [usize; UnitClass::ALL.len()],
        age: impl Fn(Tag) -> usize,
    ) -> Vec<IssuedOp> {
        let mut picked: Vec<usize> = Vec::new();
        for class in UnitClass::ALL {
            let mut ready: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.opcode.unit_class() == class && e.is_ready())
                .map(|(i, _)| i)
                .collect();
            ready.sort_by_key(|&i| age(self.entries[i].tag));
            picked.extend(ready.into_iter().take(free[class.index()]));
        }

        let selected: Vec<IssuedOp> = picked
            .iter()
            .filter_map(|&i| self.entries[i].to_issued())
            .collect();

        let mut index = 0;
        self.entries.retain(|_| {
            let keep = !picked.contains(&index);
            index += 1;
            keep
        });
        selected
    }

    /// Wakes every operand waiting on `tag` with `value`. Returns operands woken.
    pub fn broadcast_wakeup(&mut self, tag: Tag, value: u64) -> usize {
        let mut woken = 0;
        for op in self.entries.iter_mut().flat_map(|e| e.operands.iter_mut()) {
            if *op == Operand::Waiting(tag) {
                *op = Operand::Ready(value);
                woken += 1;
            }
        }
        woken
    }

    /// Removes every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    /// Resident entries in insertion (dispatch) order.
    pub fn iter(&self) -> impl Iterator<Item = &IssueQueueEntry> {
        self.entries.iter()
    }
}

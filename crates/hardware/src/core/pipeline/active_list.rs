//! Active List (Reorder Buffer) for in-order commit.
//!
//! The active list is a circular buffer that tracks in-flight instructions from
//! dispatch through commit. It provides:
//! 1. **Allocation:** Assigns each instruction a tag equal to its slot index.
//! 2. **Completion:** Marks instructions as done when their results are broadcast.
//! 3. **In-order Commit:** Retires instructions from the head in program order.
//! 4. **Rollback:** Pops entries youngest-first so their renaming can be undone.

use std::fmt;

use serde::Serialize;

use crate::common::error::{ConsistencyViolation, ExceptionCause, StructuralHazard};
use crate::core::pipeline::map_table::Mapping;
use crate::isa::Opcode;

/// Tag identifying an in-flight instruction: its active-list slot index.
///
/// Tags are unique among in-flight instructions and double as the forwarding
/// identifier on the broadcast bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Tag(pub usize);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an active-list entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EntryState {
    /// Entry allocated but its result has not been broadcast yet.
    #[default]
    Dispatched,
    /// Result broadcast; waiting to reach the head.
    Completed,
}

/// A single entry in the active list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveListEntry {
    /// Tag of this entry (its slot index).
    pub tag: Tag,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Destination architectural register.
    pub dest: Option<usize>,
    /// Map-table binding of `dest` before this instruction was dispatched.
    pub old_mapping: Option<Mapping>,
    /// Current lifecycle state.
    pub state: EntryState,
    /// Result value, valid once completed.
    pub result: u64,
    /// Exception raised during execution.
    pub exception: Option<ExceptionCause>,
}

impl ActiveListEntry {
    /// Whether the entry has completed.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == EntryState::Completed
    }
}

/// Active list: circular buffer of in-flight instructions in program order.
#[derive(Clone, Debug)]
pub struct ActiveList {
    /// Slot storage; a slot is `Some` iff it lies inside the live window.
    slots: Vec<Option<ActiveListEntry>>,
    /// Slot of the oldest entry (commit point).
    head: usize,
    /// Number of live entries.
    count: usize,
}

impl ActiveList {
    /// Creates an empty active list with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            count: 0,
        }
    }

    /// Returns the capacity `A`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no instruction is in flight.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    fn tail(&self) -> usize {
        (self.head + self.count) % self.slots.len()
    }

    /// Tag the next allocation will receive, or `None` when full.
    pub fn next_tag(&self) -> Option<Tag> {
        if self.is_full() {
            None
        } else {
            Some(Tag(self.tail()))
        }
    }

    /// Allocates a new entry at the tail.
    ///
    /// # Errors
    ///
    /// Returns `StructuralHazard::ActiveListFull` when every slot is in use.
    pub fn allocate(
        &mut self,
        pc: u64,
        opcode: Opcode,
        dest: Option<usize>,
        old_mapping: Option<Mapping>,
    ) -> Result<Tag, StructuralHazard> {
        if self.is_full() {
            return Err(StructuralHazard::ActiveListFull);
        }
        let slot = self.tail();
        let tag = Tag(slot);
        self.slots[slot] = Some(ActiveListEntry {
            tag,
            pc,
            opcode,
            dest,
            old_mapping,
            state: EntryState::Dispatched,
            result: 0,
            exception: None,
        });
        self.count += 1;
        Ok(tag)
    }

    /// Marks an entry completed with its result and exception flag.
    ///
    /// Returns the entry's destination register so the broadcast can stage the
    /// value in the renaming layer.
    ///
    /// # Errors
    ///
    /// `UnknownTag` if nothing is in flight under `tag`, `DuplicateCompletion`
    /// if the entry already completed.
    pub fn complete(
        &mut self,
        tag: Tag,
        result: u64,
        exception: Option<ExceptionCause>,
    ) -> Result<Option<usize>, ConsistencyViolation> {
        let entry = self
            .get_mut(tag)
            .ok_or(ConsistencyViolation::UnknownTag(tag))?;
        if entry.is_completed() {
            return Err(ConsistencyViolation::DuplicateCompletion(tag));
        }
        entry.state = EntryState::Completed;
        entry.result = result;
        entry.exception = exception;
        Ok(entry.dest)
    }

    /// Tag of the oldest live entry.
    pub fn head_tag(&self) -> Option<Tag> {
        self.peek_head().map(|e| e.tag)
    }

    /// Returns a reference to the head entry (oldest), if any.
    pub fn peek_head(&self) -> Option<&ActiveListEntry> {
        if self.count == 0 {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    /// Retires the head entry, which must carry `tag`.
    ///
    /// # Errors
    ///
    /// `CommitNotAtHead` if `tag` is not the head, `CommitNotReady` if the
    /// head has not completed or completed with an exception.
    pub fn commit(&mut self, tag: Tag) -> Result<ActiveListEntry, ConsistencyViolation> {
        let head = self.head_tag();
        if head != Some(tag) {
            return Err(ConsistencyViolation::CommitNotAtHead { tag, head });
        }
        let ready = self
            .peek_head()
            .is_some_and(|e| e.is_completed() && e.exception.is_none());
        if !ready {
            return Err(ConsistencyViolation::CommitNotReady(tag));
        }
        let entry = self.slots[self.head]
            .take()
            .ok_or(ConsistencyViolation::UnknownTag(tag))?;
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        Ok(entry)
    }

    /// Removes and returns the youngest entry.
    pub fn pop_youngest(&mut self) -> Option<ActiveListEntry> {
        if self.count == 0 {
            return None;
        }
        let slot = (self.head + self.count - 1) % self.slots.len();
        self.count -= 1;
        self.slots[slot].take()
    }

    /// Returns true if `tag` names a live entry.
    pub fn contains(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    /// Finds a reference to the entry with the given tag.
    pub fn get(&self, tag: Tag) -> Option<&ActiveListEntry> {
        self.slots.get(tag.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, tag: Tag) -> Option<&mut ActiveListEntry> {
        self.slots.get_mut(tag.0).and_then(Option::as_mut)
    }

    /// Program-order age of `tag`: 0 for the head, increasing toward the tail.
    ///
    /// Wraparound-safe replacement for comparing raw tags.
    pub fn age(&self, tag: Tag) -> usize {
        let capacity = self.slots.len();
        (tag.0 % capacity + capacity - self.head) % capacity
    }

    /// Iterates over live entries from head (oldest) to tail.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveListEntry> + '_ {
        let capacity = self.slots.len();
        (0..self.count).filter_map(move |i| self.slots[(self.head + i) % capacity].as_ref())
    }

    /// Verifies the window is contiguous and every entry sits in its own slot.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded` for a bad count, `TagCollision` for an entry stored
    /// under another slot, `UnknownTag` for a hole inside the window or an
    /// entry outside it.
    pub fn check_integrity(&self) -> Result<(), ConsistencyViolation> {
        let capacity = self.slots.len();
        if self.count > capacity {
            return Err(ConsistencyViolation::CapacityExceeded {
                structure: "active list",
                len: self.count,
                capacity,
            });
        }
        for (slot, entry) in self.slots.iter().enumerate() {
            let inside = (slot + capacity - self.head) % capacity < self.count;
            match (inside, entry) {
                (true, Some(e)) if e.tag.0 != slot => {
                    return Err(ConsistencyViolation::TagCollision(e.tag));
                }
                (true, None) | (false, Some(_)) => {
                    return Err(ConsistencyViolation::UnknownTag(Tag(slot)));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

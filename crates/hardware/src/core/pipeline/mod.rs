//! Instruction pipeline implementation.
//!
//! This module contains the out-of-order pipeline and the structures it drives.
//! It includes the following components:
//! 1. **Active List:** Program-order reorder buffer whose slot indices are the tags.
//! 2. **Map Table / Renamer:** Producer-tag renaming over the committed register file.
//! 3. **Issue Queue:** Operand tracking, wakeup and oldest-first selection.
//! 4. **Latches:** Decode buffer and completion latch between stages.
//! 5. **Stages:** Fetch, Dispatch, Issue, Execute, Writeback and Commit.
//! 6. **Recovery:** Precise-exception rollback.
//! 7. **Engine:** Reverse-order per-cycle sequencing of all of the above.

/// Reorder buffer and tags.
pub mod active_list;

/// Per-cycle stage sequencing.
pub mod engine;

/// Program counter and decode buffer.
pub mod frontend;

/// Scheduling window.
pub mod issue_queue;

/// Inter-stage latches (decode buffer, issued operations, completions).
pub mod latches;

/// Register map table.
pub mod map_table;

/// Precise exception rollback.
pub mod recovery;

/// Map table plus committed register state.
pub mod renamer;

/// Pipeline stage implementations.
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

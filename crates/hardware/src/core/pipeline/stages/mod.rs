//! Pipeline stage implementations.
//!
//! Each stage is a free function over the structures it touches. The engine
//! calls them in reverse pipeline order every cycle:
//! 1. **Commit:** Retires completed entries from the active-list head.
//! 2. **Writeback:** Broadcasts last cycle's results to the active list, issue queue and map table.
//! 3. **Execute:** Counts down unit latencies and evaluates finished operations.
//! 4. **Issue:** Selects the oldest ready entries per unit class.
//! 5. **Dispatch:** Renames decode-buffer instructions into the active list and issue queue.
//! 6. **Fetch:** Fills the decode buffer from the program.

/// In-order commit stage implementation.
pub mod commit;

/// Rename and dispatch stage implementation.
pub mod dispatch;

/// Functional-unit execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Ready-selection issue stage implementation.
pub mod issue;

/// Result broadcast stage implementation.
pub mod writeback;

/// Commit stage entry point.
pub use commit::commit_stage;
/// Dispatch stage entry point.
pub use dispatch::dispatch_stage;
/// Execute stage entry point.
pub use execute::execute_stage;
/// Fetch stage entry point.
pub use fetch::fetch_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Writeback (broadcast) stage entry point.
pub use writeback::writeback_stage;

//! Pipeline Latch Interface.
//!
//! This module defines the common trait for inter-stage buffers. Every latch
//! can be flushed wholesale on exception recovery and reports whether it still
//! holds work, which the driver uses to decide termination.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of instructions as they move between stages. They support
/// flushing and status checks.
pub trait PipelineLatch {
    /// Clears all entries in the latch.
    ///
    /// Called when a precise exception squashes in-flight work.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if there are no valid instructions in the latch, `false` otherwise.
    fn is_empty(&self) -> bool;
}

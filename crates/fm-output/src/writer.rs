//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for per-tick market summaries and periodic agent snapshots.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

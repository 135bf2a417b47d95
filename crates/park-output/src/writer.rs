//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, RideRunRow, RideSnapshotRow, TickSummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`ParkOutputObserver::take_error`][crate::ParkOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one finished run.
    fn write_ride_run(&mut self, row: &RideRunRow) -> OutputResult<()>;

    /// Write a batch of ride snapshots.
    fn write_ride_snapshots(&mut self, rows: &[RideSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

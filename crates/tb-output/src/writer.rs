//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CompartmentCountsRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the caller here; [`SimOutputObserver`](crate::SimOutputObserver)
/// stores them for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write one compartment-count snapshot.
    fn write_counts(&mut self, row: &CompartmentCountsRow) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

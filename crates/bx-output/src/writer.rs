//! The `TrialWriter` trait implemented by backend writers.

use bx_session::TrialRecord;

use crate::OutputResult;

/// A storage backend receiving one completed trial at a time.
///
/// Driven by [`RecordingObserver`][crate::RecordingObserver], which stores
/// errors internally (observer callbacks return nothing) for retrieval
/// after the run.
pub trait TrialWriter {
    /// Persist one trial's record.
    fn write_trial(&mut self, record: &TrialRecord) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

//! `RecordingObserver<W>` — bridges `SessionObserver` to a `TrialWriter`.

use bx_session::{SessionData, SessionObserver, TrialRecord};

use crate::writer::TrialWriter;
use crate::OutputError;

/// A [`SessionObserver`] that persists each trial through any
/// [`TrialWriter`] backend.
///
/// Writer errors are stored internally because observer callbacks have no
/// return value.  After `run()` returns, check with
/// [`take_error`][Self::take_error]; the session's in-memory data is
/// unaffected by a write failure and can be exported through another
/// writer.
pub struct RecordingObserver<W: TrialWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TrialWriter> RecordingObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the session ends.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the session).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TrialWriter> SessionObserver for RecordingObserver<W> {
    fn on_trial_recorded(&mut self, record: &TrialRecord) {
        let result = self.writer.write_trial(record);
        self.store_err(result);
    }

    fn on_session_end(&mut self, _data: &SessionData) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

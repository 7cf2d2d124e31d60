//! Session observer trait for progress reporting and data handoff.

use bx_event::EventError;

use crate::{SessionData, SessionInfo, TrialRecord};

/// Callbacks invoked by [`Experiment::run`][crate::Experiment::run] at key
/// points in the session loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_trial_recorded` is the
/// persistence handoff: it receives each completed trial's normalized
/// record exactly once, in order.
///
/// # Example — console progress
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SessionObserver for Progress {
///     fn on_trial_recorded(&mut self, record: &TrialRecord) {
///         println!("trial {} ({}) done at {:.1}s", record.index, record.name, record.t_end);
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called once, after the clock starts and before the first trial.
    fn on_session_start(&mut self, _info: &SessionInfo) {}

    /// Called when a trial type has been selected, before it runs.
    fn on_trial_start(&mut self, _index: usize, _name: &str) {}

    /// Called for each event whose `on_trigger` failed or panicked during
    /// the trial that just finished.  The trial itself was not aborted;
    /// the event's record carries no end time.
    fn on_trigger_failed(&mut self, _trial: usize, _event: &str, _error: &str) {}

    /// Called once per completed trial with its assembled record.
    fn on_trial_recorded(&mut self, _record: &TrialRecord) {}

    /// Called for each event whose `on_cleanup` failed during finalization.
    fn on_cleanup_failed(&mut self, _event: &str, _error: &EventError) {}

    /// Called once after the last trial, before event cleanup runs.
    fn on_session_end(&mut self, _data: &SessionData) {}
}

/// A [`SessionObserver`] that does nothing.  Use when you need to call
/// `run` but don't want callbacks.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

//! Session-level result data.
//!
//! The session keeps every completed trial's record in memory for the whole
//! run.  Persistence collaborators receive each record as it is produced
//! (via [`SessionObserver::on_trial_recorded`][crate::SessionObserver]);
//! if a writer fails, this in-memory copy is what the caller retries or
//! exports — collected data is never silently discarded.

use bx_trial::{EventRecord, MeasurementTrace};

/// Immutable facts about the session, fixed at `run()` start.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionInfo {
    /// Unix timestamp of session start.
    pub start_unix_secs: i64,

    /// Configured trial count (the session may record fewer if interrupted).
    pub n_trials: usize,

    pub subject:   Option<String>,
    pub condition: Option<String>,
}

/// How the session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// All configured trials ran.
    Completed,
    /// The interruption flag stopped the loop at a trial boundary.
    Interrupted,
}

/// One completed trial: identity, timing relative to session start, and
/// the trial-normalized event and measurement data.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRecord {
    /// Zero-based trial index within the session.
    pub index: usize,

    /// Name of the trial type that ran.
    pub name: String,

    /// Trial start in seconds from session start.
    pub t_start: f64,

    /// Trial end in seconds from session start.
    pub t_end: f64,

    /// Per-event logged times, relative to `t_start`.
    pub events: Vec<EventRecord>,

    /// Per-measurement sample sequences, relative to `t_start`.
    pub measurements: Vec<MeasurementTrace>,
}

/// Everything a session produced.
#[derive(Clone, Debug)]
pub struct SessionData {
    pub info:    SessionInfo,
    pub outcome: SessionOutcome,
    pub trials:  Vec<TrialRecord>,
}

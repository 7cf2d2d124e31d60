//! Per-trial context passed into every collaborator hook.

use bx_core::{SessionClock, StopFlag};

/// Read-only trial state shared with collaborator hooks.
///
/// Built once per trial by the experiment driver and cloned into each
/// event-trigger thread.  Replaces back-references from events and
/// measurements to their owners: everything a hook may need — the session
/// clock for timestamps, the trial's start time for normalization, the
/// cooperative stop flag — travels in here.
///
/// Cloning is cheap: the clock is `Copy` and the stop flag is a shared
/// atomic.
#[derive(Clone, Debug)]
pub struct TrialContext {
    /// Zero-based index of this trial within the session.
    pub trial_index: usize,

    /// Trial start in session-clock seconds.  Logged event and sample times
    /// are normalized by subtracting this value.
    pub trial_start: f64,

    /// The session's monotonic clock.
    pub clock: SessionClock,

    /// Cooperative stop flag.  Long-running `on_trigger`/`on_start` loops
    /// should poll it and bail out early when it is set; the framework
    /// itself only honors it at trial boundaries.
    pub stop: StopFlag,
}

impl TrialContext {
    #[inline]
    pub fn new(trial_index: usize, trial_start: f64, clock: SessionClock, stop: StopFlag) -> Self {
        Self { trial_index, trial_start, clock, stop }
    }
}

//! The `Experiment` struct and its session loop.

use std::thread;
use std::time::Duration;

use bx_core::{SessionClock, SessionRng, StopFlag};
use bx_event::{Pollable, TrialContext};
use bx_trial::TrialType;
use rand::distributions::{Distribution, WeightedIndex};

use crate::{
    Recorder, SessionConfig, SessionData, SessionInfo, SessionObserver, SessionOutcome,
    SessionResult, TrialRecord,
};
use crate::interrupt::InterruptGuard;

/// The top-level session driver.
///
/// Owns the trial-type registry, the shared measurement set (assigned to
/// every trial type), the optional recorder, and the session's random
/// state.  Create via [`ExperimentBuilder`][crate::ExperimentBuilder];
/// [`run`][Self::run] executes the whole session and is terminal — a new
/// session means a new `Experiment`.
pub struct Experiment {
    config:       SessionConfig,
    trial_types:  Vec<TrialType>,
    measurements: Vec<Box<dyn Pollable>>,
    recorder:     Option<Box<dyn Recorder>>,
    selector:     WeightedIndex<f64>,
    rng:          SessionRng,
    stop:         StopFlag,
}

impl Experiment {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        config:       SessionConfig,
        trial_types:  Vec<TrialType>,
        measurements: Vec<Box<dyn Pollable>>,
        recorder:     Option<Box<dyn Recorder>>,
        selector:     WeightedIndex<f64>,
        rng:          SessionRng,
        stop:         StopFlag,
    ) -> Self {
        Self { config, trial_types, measurements, recorder, selector, rng, stop }
    }

    /// The session's stop flag.  Embedding applications (a GUI stop button,
    /// a network kill switch) may clone and set it; the session stops at
    /// the next trial boundary, exactly as with Ctrl-C.
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Draw the next trial type's index by weighted random choice.
    fn select(&mut self) -> usize {
        self.selector.sample(self.rng.inner())
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the whole session: up to `n_trials` trials, or fewer if
    /// interrupted.  Returns the complete in-memory session data — the
    /// caller keeps it even if a persistence collaborator failed, so the
    /// data can be re-exported rather than lost.
    pub fn run<O: SessionObserver>(&mut self, observer: &mut O) -> SessionResult<SessionData> {
        let clock = SessionClock::start();
        self.stop.clear();
        let _interrupt_scope = InterruptGuard::install(self.stop.clone())?;

        let info = SessionInfo {
            start_unix_secs: clock.start_unix_secs,
            n_trials:        self.config.n_trials,
            subject:         self.config.subject.clone(),
            condition:       self.config.condition.clone(),
        };
        observer.on_session_start(&info);

        let mut trials: Vec<TrialRecord> = Vec::new();
        let mut outcome = SessionOutcome::Completed;

        for index in 0..self.config.n_trials {
            // Covers an interrupt delivered during the previous ITI (or
            // before the first trial).
            if self.stop.is_set() {
                outcome = SessionOutcome::Interrupted;
                break;
            }

            // ── Phase 1: select a trial type ──────────────────────────────
            let which = self.select();
            let name = self.trial_types[which].name().to_string();
            observer.on_trial_start(index, &name);

            // ── Phase 2: run the trial ────────────────────────────────────
            if let Some(recorder) = self.recorder.as_deref_mut() {
                recorder.start(index);
            }

            let t_start = clock.now();
            let ctx = TrialContext::new(index, t_start, clock, self.stop.clone());
            let trial_type = &mut self.trial_types[which];
            trial_type.plan(&ctx, &mut self.rng)?;
            let data = trial_type.run_trial(&ctx, &mut self.measurements)?;
            let t_end = clock.now();

            if let Some(recorder) = self.recorder.as_deref_mut() {
                recorder.stop();
            }

            // ── Phase 3: hand off the trial's record ──────────────────────
            for event in &data.events {
                if let Some(error) = &event.error {
                    observer.on_trigger_failed(index, &event.name, error);
                }
            }
            let record = TrialRecord {
                index,
                name,
                t_start,
                t_end,
                events:       data.events,
                measurements: data.measurements,
            };
            observer.on_trial_recorded(&record);
            trials.push(record);

            // ── Phase 4: trial boundary — honor interruption, then ITI ────
            //
            // The completed trial above is always kept; stopping here is
            // what "no partial trial" means.
            if self.stop.is_set() {
                outcome = SessionOutcome::Interrupted;
                break;
            }
            let iti = self.config.iti.sample(&mut self.rng)?;
            thread::sleep(Duration::from_secs_f64(iti));
        }

        // ── Finalize ──────────────────────────────────────────────────────
        let data = SessionData { info, outcome, trials };
        observer.on_session_end(&data);
        for trial_type in self.trial_types.iter_mut() {
            for (event, error) in trial_type.cleanup() {
                observer.on_cleanup_failed(&event, &error);
            }
        }
        Ok(data)
    }
}

#[cfg(test)]
impl Experiment {
    /// Test hook: expose weighted selection without running trials.
    pub(crate) fn select_for_test(&mut self) -> usize {
        self.select()
    }
}

//! `TrialType` — a named, weighted bundle of events that plans and executes
//! one trial occurrence.

use std::thread;
use std::time::Duration;

use bx_core::{SessionClock, SessionRng};
use bx_event::{Event, EventError, Pollable, TrialContext, Triggerable};

use crate::{EventRecord, MeasurementTrace, TrialData, TrialError, TrialResult};

/// Poll interval for the deadline wait.  Short enough that an event never
/// fires more than ~a tenth of a millisecond late; the wait never returns
/// before the deadline.
const SCHEDULE_POLL: Duration = Duration::from_micros(100);

/// Busy-wait until the session clock reaches `deadline` (seconds).
fn wait_until(clock: &SessionClock, deadline: f64) {
    while clock.now() < deadline {
        thread::sleep(SCHEDULE_POLL);
    }
}

// ── TrialType ─────────────────────────────────────────────────────────────────

/// A template for one category of trial: which events occur and with what
/// selection weight the category is drawn.
///
/// Per-trial transient state (sampled offsets, logged times) lives inside
/// the owned [`Event`]s and is rebuilt by [`plan`][Self::plan] each
/// occurrence.  A single trial is in flight at a time, so no locking guards
/// that state — the experiment driver writes it between trials and each
/// event's trigger thread touches only its own event during one.
pub struct TrialType {
    name:    String,
    weight:  f64,
    events:  Vec<Event>,
    end_pad: Option<f64>,
}

impl TrialType {
    /// Create a trial type with selection probability `weight`.
    ///
    /// Weights across all registered trial types must sum to 1; the
    /// experiment builder enforces this.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self { name: name.into(), weight, events: Vec::new(), end_pad: None }
    }

    /// Register an event.  Names must be unique within the trial type.
    pub fn add_event(&mut self, imp: Box<dyn Triggerable>) -> TrialResult<()> {
        let name = imp.name().to_string();
        if self.events.iter().any(|e| e.name() == name) {
            return Err(TrialError::Config(format!(
                "duplicate event name '{name}' in trial type '{}'",
                self.name
            )));
        }
        let decl_index = self.events.len();
        self.events.push(Event::new(imp, decl_index));
        Ok(())
    }

    /// Builder-style [`add_event`][Self::add_event].
    pub fn with_event(mut self, imp: Box<dyn Triggerable>) -> TrialResult<Self> {
        self.add_event(imp)?;
        Ok(self)
    }

    /// Pad the end of each trial of this type with `secs` of quiet time
    /// after the last event has finished and measurements have stopped.
    pub fn with_end_pad(mut self, secs: f64) -> Self {
        self.end_pad = Some(secs);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The owned events, in planned order after [`plan`][Self::plan] and in
    /// registration order before the first plan.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Prepare one occurrence: run `on_init` and draw a start offset for
    /// every event, then order events by ascending offset, ties keeping
    /// registration order.
    pub fn plan(&mut self, ctx: &TrialContext, rng: &mut SessionRng) -> TrialResult<()> {
        for event in self.events.iter_mut() {
            event.trial_start(ctx, rng)?;
        }
        self.events.sort_by(|a, b| {
            let ka = a.offset().unwrap_or(0.0);
            let kb = b.offset().unwrap_or(0.0);
            ka.total_cmp(&kb).then(a.decl_index().cmp(&b.decl_index()))
        });
        Ok(())
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Execute one planned occurrence against the absolute schedule
    /// `ctx.trial_start + offset` and return its normalized data.
    ///
    /// Trigger failures (hook errors and panics) are isolated per event:
    /// the affected event's `t_end` stays unset and the trial runs to
    /// completion.  Measurement start/stop failures abort the trial — a
    /// sensor that cannot be stopped would poison every later trial.
    pub fn run_trial(
        &mut self,
        ctx:          &TrialContext,
        measurements: &mut [Box<dyn Pollable>],
    ) -> TrialResult<TrialData> {
        for event in &self.events {
            if event.offset().is_none() {
                return Err(TrialError::Config(format!(
                    "event '{}' has no planned offset — plan() must run before run_trial()",
                    event.name()
                )));
            }
        }

        // ── Phase 1: start measurements ───────────────────────────────────
        for m in measurements.iter_mut() {
            m.on_start(ctx).map_err(|source| EventError::Start {
                measurement: m.name().to_string(),
                source,
            })?;
        }

        // ── Phase 2 + 3: schedule trigger threads, then join them all ─────
        //
        // Scoped threads give each event's thread a disjoint `&mut Event`,
        // so logged times are written without locks.  Joins happen inside
        // the scope; panicked indices are applied to the events afterwards
        // (the borrows move into the scope).
        let mut panicked: Vec<usize> = Vec::new();
        let clock = ctx.clock;
        thread::scope(|s| {
            let mut handles = Vec::with_capacity(self.events.len());
            for (idx, event) in self.events.iter_mut().enumerate() {
                let deadline = ctx.trial_start + event.offset().unwrap_or(0.0);
                wait_until(&clock, deadline);
                let hook_ctx = ctx.clone();
                handles.push((idx, s.spawn(move || event.fire(&hook_ctx))));
            }
            for (idx, handle) in handles {
                if handle.join().is_err() {
                    panicked.push(idx);
                }
            }
        });
        for idx in panicked {
            self.events[idx].mark_panicked();
        }

        // ── Phase 4: stop measurements, snapshot samples ──────────────────
        //
        // on_stop joins the polling thread, so the snapshot below is the
        // complete, final sequence for this trial.
        let mut traces = Vec::with_capacity(measurements.len());
        for m in measurements.iter_mut() {
            m.on_stop().map_err(|source| EventError::Stop {
                measurement: m.name().to_string(),
                source,
            })?;
            let samples = m.take_samples();
            let mut t = Vec::with_capacity(samples.len());
            let mut values = Vec::with_capacity(samples.len());
            for s in samples {
                t.push(s.t - ctx.trial_start);
                values.push(s.value);
            }
            traces.push(MeasurementTrace { name: m.name().to_string(), t, values });
        }

        // ── Phase 5: end pad ──────────────────────────────────────────────
        if let Some(pad) = self.end_pad {
            thread::sleep(Duration::from_secs_f64(pad));
        }

        let events = self
            .events
            .iter()
            .map(|e| EventRecord {
                name:    e.name().to_string(),
                t_start: e.logged_start().map(|t| t - ctx.trial_start),
                t_end:   e.logged_end().map(|t| t - ctx.trial_start),
                error:   e.failure().map(String::from),
            })
            .collect();

        Ok(TrialData { events, measurements: traces })
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Run `on_cleanup` once per event, collecting failures instead of
    /// propagating them — one misbehaving driver must not block the rest of
    /// the teardown.
    pub fn cleanup(&mut self) -> Vec<(String, EventError)> {
        let mut failures = Vec::new();
        for event in self.events.iter_mut() {
            let name = event.name().to_string();
            if let Err(e) = event.cleanup_once() {
                failures.push((name, e));
            }
        }
        failures
    }
}

impl std::fmt::Debug for TrialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialType")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .field("events", &self.events.len())
            .field("end_pad", &self.end_pad)
            .finish()
    }
}

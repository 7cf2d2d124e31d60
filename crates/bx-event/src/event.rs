//! `Event` — the per-trial state machine wrapped around one `Triggerable`.
//!
//! # States
//!
//! ```text
//! Idle ──trial_start()──▶ Scheduled ──fire()──▶ Triggered ──(next trial)──▶ Idle
//!   └───────────────────── cleanup_once() ─────────────────▶ Cleaned (terminal)
//! ```
//!
//! All per-trial fields (offset, logged times, failure note) are rebuilt by
//! `trial_start()`; between a trial's `fire()` and the next `trial_start()`
//! they hold that trial's results for record assembly.  One trial is in
//! flight at a time, and during a trial each `Event` is touched by exactly
//! one trigger thread, so the struct needs no interior locking.

use bx_core::SessionRng;

use crate::{EventError, EventResult, TrialContext, Triggerable};

/// One schedulable action slot: a boxed [`Triggerable`] plus the transient
/// state the framework tracks for it each trial.
pub struct Event {
    imp: Box<dyn Triggerable>,

    /// Registration order within the owning trial type.  Breaks ties when
    /// two events draw the same start offset.
    decl_index: usize,

    /// This trial's start offset in seconds from trial start.  `None` until
    /// `trial_start()` has run.
    offset: Option<f64>,

    /// Session-clock time immediately before `on_trigger` ran.
    logged_start: Option<f64>,

    /// Session-clock time immediately after `on_trigger` returned.  Stays
    /// `None` when the hook failed or panicked — the marker for "this
    /// event's data is missing this trial".
    logged_end: Option<f64>,

    /// Failure note from a failed or panicked trigger.
    failure: Option<String>,

    cleaned: bool,
}

impl Event {
    /// Wrap a driver.  `decl_index` is the registration position within the
    /// owning trial type.
    pub fn new(imp: Box<dyn Triggerable>, decl_index: usize) -> Self {
        Self {
            imp,
            decl_index,
            offset: None,
            logged_start: None,
            logged_end: None,
            failure: None,
            cleaned: false,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.imp.name()
    }

    #[inline]
    pub fn decl_index(&self) -> usize {
        self.decl_index
    }

    /// The offset assigned by the last `trial_start()`, if any.
    #[inline]
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    #[inline]
    pub fn logged_start(&self) -> Option<f64> {
        self.logged_start
    }

    #[inline]
    pub fn logged_end(&self) -> Option<f64> {
        self.logged_end
    }

    #[inline]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Reset per-trial state, run `on_init`, and draw this trial's start
    /// offset.  Idle → Scheduled.
    ///
    /// Offsets must be finite and non-negative; anything else is a
    /// configuration-class error surfaced before the trial runs.
    pub fn trial_start(&mut self, ctx: &TrialContext, rng: &mut SessionRng) -> EventResult<()> {
        self.offset = None;
        self.logged_start = None;
        self.logged_end = None;
        self.failure = None;

        self.imp.on_init(ctx).map_err(|source| EventError::Init {
            event: self.imp.name().to_string(),
            source,
        })?;

        let offset = self
            .imp
            .assign_start_time(rng)
            .map_err(|source| EventError::Schedule {
                event: self.imp.name().to_string(),
                source,
            })?;
        if !offset.is_finite() || offset < 0.0 {
            return Err(EventError::Offset { event: self.imp.name().to_string(), offset });
        }
        self.offset = Some(offset);
        Ok(())
    }

    /// Run `on_trigger`, logging wall-clock start/end around the call.
    /// Scheduled → Triggered.
    ///
    /// Called on the event's dedicated thread.  A hook error is recorded
    /// and `logged_end` left unset; the caller sees the failure in the
    /// trial record, never as a propagated error.
    pub fn fire(&mut self, ctx: &TrialContext) {
        self.logged_start = Some(ctx.clock.now());
        match self.imp.on_trigger(ctx) {
            Ok(()) => self.logged_end = Some(ctx.clock.now()),
            Err(e) => self.failure = Some(e.to_string()),
        }
    }

    /// Record that the trigger thread panicked before `fire` completed.
    /// Called by the scheduler after joining the thread.
    pub fn mark_panicked(&mut self) {
        if self.failure.is_none() {
            self.failure = Some("trigger thread panicked".to_string());
        }
        self.logged_end = None;
    }

    /// Run `on_cleanup` exactly once; later calls are no-ops.  → Cleaned.
    pub fn cleanup_once(&mut self) -> EventResult<()> {
        if self.cleaned {
            return Ok(());
        }
        self.cleaned = true;
        self.imp.on_cleanup().map_err(|source| EventError::Cleanup {
            event: self.imp.name().to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.imp.name())
            .field("decl_index", &self.decl_index)
            .field("offset", &self.offset)
            .field("logged_start", &self.logged_start)
            .field("logged_end", &self.logged_end)
            .field("failure", &self.failure)
            .field("cleaned", &self.cleaned)
            .finish()
    }
}

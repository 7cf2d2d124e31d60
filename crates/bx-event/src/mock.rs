//! Mock collaborators for machines without attached hardware.
//!
//! Used by the workspace tests and the demo paradigm; also handy for
//! dry-running a paradigm on a development laptop before deploying to the
//! rig.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bx_core::{SessionRng, TimeSpec};

use crate::{HookResult, PollLoop, Pollable, Sample, TrialContext, Triggerable};

// ── MockEvent ─────────────────────────────────────────────────────────────────

/// A no-hardware event: draws its start offset from a [`TimeSpec`] and
/// optionally holds (sleeps) for a fixed duration in `on_trigger`, standing
/// in for a tone playing or a valve staying open.
pub struct MockEvent {
    name:     String,
    start:    TimeSpec,
    hold:     Option<Duration>,
    fail:     bool,
    triggers: Arc<AtomicUsize>,
    cleanups: Arc<AtomicUsize>,
}

impl MockEvent {
    pub fn new(name: impl Into<String>, start: impl Into<TimeSpec>) -> Self {
        Self {
            name:     name.into(),
            start:    start.into(),
            hold:     None,
            fail:     false,
            triggers: Arc::new(AtomicUsize::new(0)),
            cleanups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hold for `secs` inside `on_trigger`, polling the stop flag so an
    /// interrupted session is not kept waiting.
    pub fn with_hold(mut self, secs: f64) -> Self {
        self.hold = Some(Duration::from_secs_f64(secs));
        self
    }

    /// Make every `on_trigger` return an error (for failure-path tests).
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Shared trigger counter, readable after the event has been consumed
    /// by a trial type.
    pub fn trigger_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.triggers)
    }

    /// Shared cleanup counter.
    pub fn cleanup_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.cleanups)
    }
}

impl Triggerable for MockEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn assign_start_time(&mut self, rng: &mut SessionRng) -> HookResult<f64> {
        Ok(self.start.sample(rng)?)
    }

    fn on_trigger(&mut self, ctx: &TrialContext) -> HookResult<()> {
        self.triggers.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(format!("mock event '{}' configured to fail", self.name).into());
        }
        if let Some(hold) = self.hold {
            let deadline = Instant::now() + hold;
            while Instant::now() < deadline {
                if ctx.stop.is_set() {
                    break;
                }
                std::thread::sleep(Duration::from_millis(1));
            }
        }
        Ok(())
    }

    fn on_cleanup(&mut self) -> HookResult<()> {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ── MockMeasurement ───────────────────────────────────────────────────────────

/// A no-hardware sensor channel producing a deterministic synthetic
/// waveform at the configured rate via [`PollLoop`].
pub struct MockMeasurement {
    name:    String,
    rate_hz: f64,
    active:  Option<PollLoop>,
    samples: Vec<Sample>,
}

impl MockMeasurement {
    pub fn new(name: impl Into<String>, rate_hz: f64) -> Self {
        Self { name: name.into(), rate_hz, active: None, samples: Vec::new() }
    }
}

impl Pollable for MockMeasurement {
    fn name(&self) -> &str {
        &self.name
    }

    fn sampling_rate(&self) -> f64 {
        self.rate_hz
    }

    fn on_start(&mut self, ctx: &TrialContext) -> HookResult<()> {
        if self.active.is_some() {
            return Err(format!("measurement '{}' already started", self.name).into());
        }
        self.samples.clear();
        let rate = self.rate_hz;
        let mut tick = 0u64;
        // 2 Hz sine, deterministic — no RNG off the main thread.
        self.active = Some(PollLoop::spawn(rate, ctx.clock, move || {
            tick += 1;
            (tick as f64 * 2.0 * std::f64::consts::PI * 2.0 / rate).sin()
        }));
        Ok(())
    }

    fn on_stop(&mut self) -> HookResult<()> {
        match self.active.take() {
            Some(active) => {
                self.samples = active.stop();
                Ok(())
            }
            None => Err(format!("measurement '{}' was not started", self.name).into()),
        }
    }

    fn take_samples(&mut self) -> Vec<Sample> {
        std::mem::take(&mut self.samples)
    }
}

//! `PollLoop` — the drift-corrected sampling thread behind `Pollable`
//! implementations.
//!
//! # Why drift correction
//!
//! A naive loop (`sample; sleep(period)`) drifts: each iteration's overhead
//! adds to the sleep, so a 200 Hz channel loses samples steadily over a
//! long trial.  `PollLoop` instead advances a monotonic deadline by exactly
//! one period per iteration and sleeps only the remainder, so the sample
//! count over a trial stays within one or two of `rate × duration`
//! regardless of per-iteration cost.
//!
//! If an iteration overruns its period (a slow sensor read), the deadline
//! is resynchronised to "now" rather than letting the loop burst to catch
//! up — burst samples would be closer together than the advertised rate.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bx_core::{SessionClock, StopFlag};

use crate::Sample;

/// A background sampling thread collecting `(timestamp, value)` pairs at a
/// fixed target rate until stopped.
pub struct PollLoop {
    stop:   StopFlag,
    handle: JoinHandle<Vec<Sample>>,
}

impl PollLoop {
    /// Launch the loop, sampling `read()` at `rate_hz`.
    ///
    /// Timestamps come from `clock` (session seconds).  The first sample is
    /// taken immediately.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `rate_hz` is not a positive finite number.
    pub fn spawn<F>(rate_hz: f64, clock: SessionClock, mut read: F) -> Self
    where
        F: FnMut() -> f64 + Send + 'static,
    {
        debug_assert!(
            rate_hz.is_finite() && rate_hz > 0.0,
            "sampling rate must be positive, got {rate_hz}"
        );
        let stop = StopFlag::new();
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            let period = Duration::from_secs_f64(1.0 / rate_hz);
            let mut samples = Vec::new();
            let mut deadline = Instant::now();
            // Sample-first: even a stop that lands before the first period
            // elapses leaves one sample, so a started measurement is never
            // empty.
            loop {
                samples.push(Sample { t: clock.now(), value: read() });
                deadline += period;
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                } else {
                    deadline = now; // overran a period: resynchronise
                }
                if flag.is_set() {
                    break;
                }
            }
            samples
        });
        Self { stop, handle }
    }

    /// Signal the loop to stop, join the thread, and return the collected
    /// samples.  No sample is appended after this returns.
    ///
    /// If the read closure panicked, the samples are lost and an empty
    /// sequence is returned.
    pub fn stop(self) -> Vec<Sample> {
        self.stop.set();
        self.handle.join().unwrap_or_default()
    }
}

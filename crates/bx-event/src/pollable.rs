//! The `Pollable` trait — the contract for continuous background samplers.

use crate::{HookResult, TrialContext};

/// One timestamped sensor reading.
///
/// `t` is in session-clock seconds; per-trial normalization (subtracting
/// the trial start) happens when the trial record is assembled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub t:     f64,
    pub value: f64,
}

/// A continuously polled sensor channel: a lickometer, a rotary encoder, a
/// photodiode.  Implemented by hardware drivers outside this workspace;
/// shared by reference across all trial types of an experiment.
///
/// # Contract
///
/// - [`on_start`][Self::on_start] must return immediately after launching
///   the internal polling loop on its own thread.  The provided
///   [`PollLoop`][crate::PollLoop] implements the loop contract: sample at
///   the target rate, append `(timestamp, value)`, and sleep the remainder
///   of each period against a monotonic deadline so long trials do not
///   accumulate skew.
/// - [`on_stop`][Self::on_stop] must signal the loop and join the thread
///   before returning — after it returns, no further write to the sample
///   sequence can occur.
/// - The sample sequence is rebuilt (not appended to) each trial;
///   [`take_samples`][Self::take_samples] is called once per trial, after
///   `on_stop`, and before the next trial starts.
pub trait Pollable: Send + 'static {
    /// Name of the channel, unique across the experiment.  Used for data
    /// storage keys.
    fn name(&self) -> &str;

    /// Target sampling rate in Hz.
    fn sampling_rate(&self) -> f64;

    /// Start the polling loop.  Non-blocking.
    fn on_start(&mut self, ctx: &TrialContext) -> HookResult<()>;

    /// Stop the polling loop and join its thread.  Blocking.
    fn on_stop(&mut self) -> HookResult<()>;

    /// Drain the samples collected since the last `on_start`.
    fn take_samples(&mut self) -> Vec<Sample>;
}

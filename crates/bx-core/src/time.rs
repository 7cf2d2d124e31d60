//! Session time model and stochastic time specs.
//!
//! # Design
//!
//! All timestamps in the framework are `f64` seconds since the start of the
//! session, read from a single [`SessionClock`].  The clock pairs a monotonic
//! anchor (`Instant`) with the Unix timestamp of the session start:
//!
//!   wall_time = start_unix_secs + now()
//!
//! Scheduling arithmetic and logged event/measurement times all use the
//! monotonic side, so wall-clock adjustments (NTP, DST) cannot skew a
//! running session.  Per-trial normalization is a subtraction of the trial's
//! start time; it happens once, when a trial's record is assembled.
//!
//! Time offsets (event starts, inter-trial intervals) are described by a
//! [`TimeSpec`]: either a fixed scalar or a bounded statistical distribution
//! from which a value is drawn fresh every trial.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::distributions::Distribution;
use rand_distr::{Exp, Normal};

use crate::{CoreError, CoreResult, SessionRng};

/// Upper bound on rejection-sampling draws for one [`TimeSpec::sample`] call.
///
/// A bounded distribution whose `(min, max)` window excludes essentially all
/// probability mass would otherwise loop forever; past this many draws the
/// spec is treated as misconfigured and sampling fails fast.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 10_000;

// ── SessionClock ──────────────────────────────────────────────────────────────

/// Monotonic session clock, cheap to copy into worker threads.
///
/// Created once per run; `now()` is seconds elapsed since that moment.
#[derive(Copy, Clone, Debug)]
pub struct SessionClock {
    started: Instant,
    /// Unix timestamp (seconds since epoch) of session start, for metadata.
    pub start_unix_secs: i64,
}

impl SessionClock {
    /// Anchor a new clock at the current instant.
    pub fn start() -> Self {
        let start_unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self { started: Instant::now(), start_unix_secs }
    }

    /// Seconds elapsed since session start.
    #[inline]
    pub fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

// ── TimeDist ──────────────────────────────────────────────────────────────────

/// A statistical distribution over time values, in seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeDist {
    /// Uniform over `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Normal with the given mean and standard deviation.
    Normal { mean: f64, sd: f64 },
    /// Exponential with the given mean (`1 / rate`).
    Exponential { mean: f64 },
}

impl TimeDist {
    fn validate(&self) -> CoreResult<()> {
        let finite = |v: f64, what: &str| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{what} must be finite, got {v}")))
            }
        };
        match *self {
            TimeDist::Uniform { low, high } => {
                finite(low, "uniform low")?;
                finite(high, "uniform high")?;
                if low >= high {
                    return Err(CoreError::Config(format!(
                        "uniform bounds must satisfy low < high, got [{low}, {high})"
                    )));
                }
            }
            TimeDist::Normal { mean, sd } => {
                finite(mean, "normal mean")?;
                finite(sd, "normal sd")?;
                if sd <= 0.0 {
                    return Err(CoreError::Config(format!("normal sd must be > 0, got {sd}")));
                }
            }
            TimeDist::Exponential { mean } => {
                finite(mean, "exponential mean")?;
                if mean <= 0.0 {
                    return Err(CoreError::Config(format!(
                        "exponential mean must be > 0, got {mean}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// One unbounded draw.  Callers are expected to have validated first.
    fn draw(&self, rng: &mut SessionRng) -> CoreResult<f64> {
        match *self {
            TimeDist::Uniform { low, high } => Ok(rng.gen_range(low..high)),
            TimeDist::Normal { mean, sd } => {
                let dist = Normal::new(mean, sd)
                    .map_err(|e| CoreError::Config(format!("normal({mean}, {sd}): {e}")))?;
                Ok(dist.sample(rng.inner()))
            }
            TimeDist::Exponential { mean } => {
                let dist = Exp::new(1.0 / mean)
                    .map_err(|e| CoreError::Config(format!("exponential(mean {mean}): {e}")))?;
                Ok(dist.sample(rng.inner()))
            }
        }
    }
}

// ── TimeSpec ──────────────────────────────────────────────────────────────────

/// A fixed time value, or a bounded distribution to draw one from.
///
/// Sampled values from the `Random` variant always lie *strictly* inside
/// `(min, max)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeSpec {
    /// A deterministic value, returned unchanged on every sample.
    Fixed(f64),
    /// A distribution rejection-sampled into the open interval `(min, max)`.
    Random { dist: TimeDist, min: f64, max: f64 },
}

impl TimeSpec {
    /// Convenience constructor for a bounded distributional spec.
    pub fn random(dist: TimeDist, min: f64, max: f64) -> Self {
        TimeSpec::Random { dist, min, max }
    }

    /// Check the spec for configuration errors without drawing anything.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            TimeSpec::Fixed(v) => {
                if !v.is_finite() || *v < 0.0 {
                    return Err(CoreError::Config(format!(
                        "fixed time must be finite and >= 0, got {v}"
                    )));
                }
                Ok(())
            }
            TimeSpec::Random { dist, min, max } => {
                dist.validate()?;
                if !(min < max) {
                    return Err(CoreError::Config(format!(
                        "time bounds must satisfy min < max, got ({min}, {max})"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Draw a time value in seconds.
    ///
    /// `Fixed` returns the scalar unchanged without touching the RNG.
    /// `Random` redraws until the value lies strictly inside `(min, max)`,
    /// giving up after [`MAX_SAMPLE_ATTEMPTS`] draws.
    pub fn sample(&self, rng: &mut SessionRng) -> CoreResult<f64> {
        self.validate()?;
        match self {
            TimeSpec::Fixed(v) => Ok(*v),
            TimeSpec::Random { dist, min, max } => {
                for _ in 0..MAX_SAMPLE_ATTEMPTS {
                    let v = dist.draw(rng)?;
                    if v > *min && v < *max {
                        return Ok(v);
                    }
                }
                Err(CoreError::SamplingExhausted {
                    attempts: MAX_SAMPLE_ATTEMPTS,
                    min:      *min,
                    max:      *max,
                })
            }
        }
    }
}

impl From<f64> for TimeSpec {
    fn from(v: f64) -> Self {
        TimeSpec::Fixed(v)
    }
}

//! Fluent builder for constructing an [`Experiment`].

use bx_core::{SessionRng, StopFlag};
use bx_event::Pollable;
use bx_trial::TrialType;
use rand::distributions::WeightedIndex;

use crate::{Experiment, Recorder, SessionConfig, SessionError, SessionResult};

/// Selection weights must sum to 1 within this tolerance.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Fluent builder for [`Experiment`].
///
/// # Required inputs
///
/// - [`SessionConfig`] — trial count, ITI spec, seed, metadata
/// - at least one [`TrialType`] via [`trial_type`][Self::trial_type]
///
/// # Optional inputs
///
/// | Method             | Default                                    |
/// |--------------------|--------------------------------------------|
/// | `.measurement(m)`  | No background sampling                     |
/// | `.recorder(r)`     | No per-trial video notifications           |
///
/// `build()` validates the whole configuration: the ITI spec, unique trial
/// type and measurement names, and that selection weights are positive and
/// sum to 1 (a non-normalizing weight set is a configuration error, never a
/// silent re-normalization).  Every registered measurement is assigned to
/// every trial type — a trial type that runs always carries the full
/// sensor set.
///
/// # Example
///
/// ```rust,ignore
/// let mut exp = ExperimentBuilder::new(config)
///     .trial_type(trial_small)
///     .trial_type(trial_large)
///     .measurement(Box::new(lickometer))
///     .build()?;
/// exp.run(&mut NoopObserver)?;
/// ```
pub struct ExperimentBuilder {
    config:       SessionConfig,
    trial_types:  Vec<TrialType>,
    measurements: Vec<Box<dyn Pollable>>,
    recorder:     Option<Box<dyn Recorder>>,
}

impl ExperimentBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            trial_types:  Vec::new(),
            measurements: Vec::new(),
            recorder:     None,
        }
    }

    /// Register a trial type.  Names must be unique across the experiment.
    pub fn trial_type(mut self, trial_type: TrialType) -> Self {
        self.trial_types.push(trial_type);
        self
    }

    /// Register a measurement, shared by every trial type.  Names must be
    /// unique across the experiment.
    pub fn measurement(mut self, measurement: Box<dyn Pollable>) -> Self {
        self.measurements.push(measurement);
        self
    }

    /// Attach the optional per-trial video recorder.
    pub fn recorder(mut self, recorder: Box<dyn Recorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Experiment`].
    pub fn build(self) -> SessionResult<Experiment> {
        self.config.iti.validate()?;

        if self.trial_types.is_empty() {
            return Err(SessionError::Config(
                "an experiment needs at least one trial type".to_string(),
            ));
        }

        // ── Name uniqueness ───────────────────────────────────────────────
        for (i, tt) in self.trial_types.iter().enumerate() {
            if self.trial_types[..i].iter().any(|other| other.name() == tt.name()) {
                return Err(SessionError::Config(format!(
                    "duplicate trial type name '{}'",
                    tt.name()
                )));
            }
        }
        for (i, m) in self.measurements.iter().enumerate() {
            if self.measurements[..i].iter().any(|other| other.name() == m.name()) {
                return Err(SessionError::Config(format!(
                    "duplicate measurement name '{}'",
                    m.name()
                )));
            }
        }

        // ── Selection weights ─────────────────────────────────────────────
        let weights: Vec<f64> = self.trial_types.iter().map(|tt| tt.weight()).collect();
        for (tt, &w) in self.trial_types.iter().zip(&weights) {
            if !w.is_finite() || w <= 0.0 {
                return Err(SessionError::Config(format!(
                    "trial type '{}' has invalid selection weight {w}",
                    tt.name()
                )));
            }
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(SessionError::Config(format!(
                "trial type weights must sum to 1, got {total}"
            )));
        }
        let selector = WeightedIndex::new(weights.iter().copied())
            .map_err(|e| SessionError::Config(format!("invalid weight set: {e}")))?;

        let rng = match self.config.seed {
            Some(seed) => SessionRng::from_seed(seed),
            None => SessionRng::from_entropy(),
        };

        Ok(Experiment::from_parts(
            self.config,
            self.trial_types,
            self.measurements,
            self.recorder,
            selector,
            rng,
            StopFlag::new(),
        ))
    }
}

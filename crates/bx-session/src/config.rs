//! Top-level session configuration.

use bx_core::TimeSpec;

/// Configuration for one experimental session.
///
/// Typically assembled in the paradigm script (or deserialized from a
/// config file with the `serde` feature) and passed to
/// [`ExperimentBuilder::new`][crate::ExperimentBuilder::new].  Subject and
/// condition are free-form metadata carried through to the persistence
/// collaborator; prompting for them is the application's business, not the
/// core's.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Number of trials to run.  Zero is legal and ends immediately.
    pub n_trials: usize,

    /// Inter-trial interval, sampled fresh after every trial.
    pub iti: TimeSpec,

    /// Master RNG seed.  The same seed replays the identical trial
    /// sequence and timing draws.  `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Subject identifier (e.g. a mouse ID), for data storage.
    pub subject: Option<String>,

    /// Experimental condition label, for data storage.
    pub condition: Option<String>,
}

impl SessionConfig {
    pub fn new(n_trials: usize, iti: impl Into<TimeSpec>) -> Self {
        Self {
            n_trials,
            iti: iti.into(),
            seed: None,
            subject: None,
            condition: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

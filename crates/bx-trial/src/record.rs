//! Plain per-trial result data, normalized to the trial's start time.

/// One event's logged timing for one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    pub name: String,

    /// Seconds from trial start at which `on_trigger` began.
    pub t_start: Option<f64>,

    /// Seconds from trial start at which `on_trigger` returned.  `None`
    /// marks this event's data missing for the trial (the trigger failed
    /// or panicked).
    pub t_end: Option<f64>,

    /// Failure note when the trigger did not complete.
    pub error: Option<String>,
}

/// One measurement channel's samples for one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementTrace {
    pub name: String,

    /// Sample times in seconds from trial start.  Parallel to `values`.
    pub t: Vec<f64>,

    pub values: Vec<f64>,
}

/// Everything one `run_trial` call produced.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TrialData {
    pub events:       Vec<EventRecord>,
    pub measurements: Vec<MeasurementTrace>,
}

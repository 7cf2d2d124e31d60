//! Error types for bx-event.
//!
//! Collaborator hooks return [`HookResult`] with a boxed error so drivers
//! can use whatever error type suits their hardware stack; the framework
//! wraps hook failures with the owning event/measurement name.

use thiserror::Error;

/// The error type collaborator hooks may return.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shorthand result for collaborator hook implementations.
pub type HookResult<T> = Result<T, HookError>;

/// Errors surfaced by the event/measurement machinery.
///
/// Trigger failures are deliberately absent: a failing `on_trigger` is
/// caught on the event's own thread, recorded in the trial data as a
/// missing end time, and never propagated (the trial is not aborted).
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event '{event}' failed during on_init: {source}")]
    Init {
        event:  String,
        #[source]
        source: HookError,
    },

    #[error("event '{event}' failed to assign a start time: {source}")]
    Schedule {
        event:  String,
        #[source]
        source: HookError,
    },

    #[error("event '{event}' produced invalid start offset {offset}")]
    Offset { event: String, offset: f64 },

    #[error("event '{event}' failed during on_cleanup: {source}")]
    Cleanup {
        event:  String,
        #[source]
        source: HookError,
    },

    #[error("measurement '{measurement}' failed to start: {source}")]
    Start {
        measurement: String,
        #[source]
        source:      HookError,
    },

    #[error("measurement '{measurement}' failed to stop: {source}")]
    Stop {
        measurement: String,
        #[source]
        source:      HookError,
    },
}

/// Alias for `Result<T, EventError>`.
pub type EventResult<T> = Result<T, EventError>;

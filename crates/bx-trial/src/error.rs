use bx_core::CoreError;
use bx_event::EventError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrialError {
    #[error("trial configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Event(#[from] EventError),
}

pub type TrialResult<T> = Result<T, TrialError>;

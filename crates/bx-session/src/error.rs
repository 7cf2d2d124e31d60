use bx_core::CoreError;
use bx_trial::TrialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Trial(#[from] TrialError),

    #[error("failed to install the interruption handler: {0}")]
    Signal(#[from] std::io::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

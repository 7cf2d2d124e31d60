//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `#[from]` variants; the reverse direction never occurs (`bx-core`
//! depends on no `bx-*` crate).

use thiserror::Error;

/// The top-level error type for `bx-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An invalid time spec, distribution parameter, or weight set.
    /// Fatal at setup or first use.
    #[error("configuration error: {0}")]
    Config(String),

    /// Rejection sampling never produced a value inside the configured
    /// bounds.  Almost always means `(min, max)` excludes essentially all of
    /// the distribution's mass.
    #[error(
        "gave up sampling after {attempts} draws: no value fell strictly inside ({min}, {max})"
    )]
    SamplingExhausted { attempts: u32, min: f64, max: f64 },
}

/// Shorthand result type for all `bx-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;

//! `bx-core` — foundational types for the `rust_bx` behavioral-experiment
//! framework.
//!
//! This crate is a dependency of every other `bx-*` crate.  It intentionally
//! has no `bx-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`time`]  | `SessionClock`, `TimeDist`, `TimeSpec`                  |
//! | [`rng`]   | `SessionRng` (main-thread random state)                 |
//! | [`stop`]  | `StopFlag` (cooperative interruption/cancellation)      |
//! | [`error`] | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `TimeSpec`/`TimeDist`.  |

pub mod error;
pub mod rng;
pub mod stop;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use rng::SessionRng;
pub use stop::StopFlag;
pub use time::{SessionClock, TimeDist, TimeSpec, MAX_SAMPLE_ATTEMPTS};

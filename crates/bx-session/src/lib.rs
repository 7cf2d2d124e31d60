//! `bx-session` — the experiment driver.
//!
//! # Session loop
//!
//! ```text
//! for trial in 0..n_trials (or until interrupted):
//!   ① Select   — weighted random choice of a trial type
//!   ② Record   — notify the optional video recorder
//!   ③ Run      — plan offsets, execute the trial (bx-trial)
//!   ④ Persist  — assemble the normalized TrialRecord, hand it to the
//!                observer, keep it in the in-memory session data
//!   ⑤ ITI      — sample the inter-trial interval and sleep it
//!   ⑥ Stop?    — if the interruption flag is set, stop after this
//!                completed trial (no partial trial is ever recorded)
//! finalize: session-end hook, then on_cleanup once per event
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`config`]    | `SessionConfig`                                       |
//! | [`builder`]   | `ExperimentBuilder` — typed registration + validation |
//! | [`session`]   | `Experiment` and its trial loop                       |
//! | [`observer`]  | `SessionObserver` trait, `NoopObserver`               |
//! | [`recorder`]  | `Recorder` — the optional video collaborator          |
//! | [`interrupt`] | `InterruptGuard` — scoped SIGINT capture              |
//! | [`record`]    | `SessionInfo`, `TrialRecord`, `SessionData`           |
//! | [`error`]     | `SessionError`, `SessionResult<T>`                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bx_core::{TimeDist, TimeSpec};
//! use bx_event::{MockEvent, MockMeasurement};
//! use bx_session::{ExperimentBuilder, NoopObserver, SessionConfig};
//! use bx_trial::TrialType;
//!
//! let config = SessionConfig::new(100, TimeSpec::random(
//!     TimeDist::Exponential { mean: 3.0 }, 1.0, 10.0));
//! let mut exp = ExperimentBuilder::new(config)
//!     .trial_type(TrialType::new("go", 0.5)
//!         .with_event(Box::new(MockEvent::new("tone", 1.0)))?)
//!     .trial_type(TrialType::new("no-go", 0.5))
//!     .measurement(Box::new(MockMeasurement::new("licks", 200.0)))
//!     .build()?;
//! let data = exp.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod observer;
pub mod record;
pub mod recorder;
pub mod session;


pub use builder::ExperimentBuilder;
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use interrupt::InterruptGuard;
pub use observer::{NoopObserver, SessionObserver};
pub use record::{SessionData, SessionInfo, SessionOutcome, TrialRecord};
pub use recorder::Recorder;
pub use session::Experiment;

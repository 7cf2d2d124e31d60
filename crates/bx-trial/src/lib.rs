//! `bx-trial` — trial-type planning and execution.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`trial`]  | `TrialType` — plan offsets, order events, run one trial   |
//! | [`record`] | `EventRecord`, `MeasurementTrace`, `TrialData`            |
//! | [`error`]  | `TrialError`, `TrialResult<T>`                            |
//!
//! # Trial execution (summary)
//!
//! ```text
//! plan():       on_init + assign_start_time per event,
//!               sort by (offset, registration order)
//! run_trial():  ① start every assigned measurement
//!               ② per event in planned order: busy-wait to
//!                  trial_start + offset, spawn its trigger thread
//!               ③ join every trigger thread (panics isolated per event)
//!               ④ stop measurements, snapshot + normalize samples
//!               ⑤ sleep the end pad, if configured
//! ```
//!
//! Events whose schedules overlap run concurrently with no mutual
//! exclusion; a trial never completes before its slowest event finishes.

pub mod error;
pub mod record;
pub mod trial;

#[cfg(test)]
mod tests;

pub use error::{TrialError, TrialResult};
pub use record::{EventRecord, MeasurementTrace, TrialData};
pub use trial::TrialType;

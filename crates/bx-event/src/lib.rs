//! `bx-event` — the two collaborator contracts of the framework and the
//! machinery that drives them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`triggerable`] | `Triggerable` — a discrete timed action                |
//! | [`pollable`]    | `Pollable`, `Sample` — a continuous background sampler |
//! | [`context`]     | `TrialContext` passed into every hook                  |
//! | [`event`]       | `Event` — per-trial state machine around a Triggerable |
//! | [`poll`]        | `PollLoop` — drift-corrected sampling thread           |
//! | [`mock`]        | `MockEvent`, `MockMeasurement` for tests and demos     |
//! | [`error`]       | `EventError`, `EventResult<T>`, hook error aliases     |
//!
//! # Design notes
//!
//! Hardware drivers (tones, valves, lickometers, camera triggers) live
//! outside this workspace; they plug in by implementing [`Triggerable`] or
//! [`Pollable`].  Required capabilities are required trait methods, so a
//! driver missing one simply does not compile — the equivalent of the
//! "missing capability" configuration error surfaced at setup.  Hooks that
//! need the trial's timing or the session stop flag receive them through
//! [`TrialContext`] rather than holding a reference back to their owner.

pub mod context;
pub mod error;
pub mod event;
pub mod mock;
pub mod poll;
pub mod pollable;
pub mod triggerable;


pub use context::TrialContext;
pub use error::{EventError, EventResult, HookError, HookResult};
pub use event::Event;
pub use mock::{MockEvent, MockMeasurement};
pub use poll::PollLoop;
pub use pollable::{Pollable, Sample};
pub use triggerable::Triggerable;

//! `bx-output` — persistence collaborators for the rust_bx framework.
//!
//! The session core never writes files; it hands each completed trial's
//! record to a [`SessionObserver`][bx_session::SessionObserver].  This
//! crate supplies the bridge from that handoff to a storage backend:
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`writer`]   | `TrialWriter` — the backend trait                     |
//! | [`csv`]      | `CsvWriter` — `trials.csv`, `events.csv`, `samples.csv` |
//! | [`observer`] | `RecordingObserver<W>` — observer → writer bridge     |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use bx_output::{CsvWriter, RecordingObserver};
//!
//! let writer = CsvWriter::new(Path::new("./data"))?;
//! let mut obs = RecordingObserver::new(writer);
//! let data = experiment.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     // `data` is still complete in memory — re-export it elsewhere.
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordingObserver;
pub use writer::TrialWriter;

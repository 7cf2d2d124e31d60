//! Cooperative stop flag.
//!
//! Interruption (Ctrl-C) is never delivered as an exception or a forced
//! unwind: the signal handler only sets this flag, and the experiment
//! driver polls it at trial boundaries — the current trial always runs to
//! completion.  The same flag is handed to collaborator hooks through the
//! trial context so that long-running `on_trigger`/`on_start` loops can
//! bail out early instead of outliving the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable boolean flag shared between the signal handler, the
/// experiment driver, and collaborator threads.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag.  Idempotent.
    #[inline]
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lower the flag (used between sessions and in tests).
    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// The shared atomic itself, for APIs that want an `Arc<AtomicBool>`
    /// (e.g. `signal_hook::flag::register`).
    #[inline]
    pub fn as_arc(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

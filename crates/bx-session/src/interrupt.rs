//! Scoped SIGINT capture.
//!
//! Ctrl-C during a session must not kill the process mid-trial — rewards
//! half-delivered, sensors left running, data unsaved.  While a guard is
//! alive, SIGINT only raises the session's [`StopFlag`]; the trial loop
//! honors it at the next trial boundary.  Dropping the guard unregisters
//! the handler, restoring default Ctrl-C behavior outside the session.

use signal_hook::consts::SIGINT;
use signal_hook::SigId;

use bx_core::StopFlag;

/// RAII scope during which SIGINT is converted into a cooperative stop
/// flag instead of terminating the process.
pub struct InterruptGuard {
    id: SigId,
}

impl InterruptGuard {
    /// Register the handler.  `flag` is set (never cleared) on SIGINT.
    pub fn install(flag: StopFlag) -> std::io::Result<Self> {
        let id = signal_hook::flag::register(SIGINT, flag.as_arc())?;
        Ok(Self { id })
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.id);
    }
}

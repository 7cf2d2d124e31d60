//! The `Triggerable` trait — the contract for discrete timed actions.

use bx_core::SessionRng;

use crate::{HookResult, TrialContext};

/// A discrete timed action: a tone, a reward valve pulse, an air puff, a
/// TTL edge.  Implemented by hardware drivers outside this workspace and
/// owned by exactly one trial type.
///
/// # Required methods
///
/// `name`, [`assign_start_time`][Self::assign_start_time], and
/// [`on_trigger`][Self::on_trigger].  `on_init` and `on_cleanup` default to
/// no-ops.
///
/// # Call pattern, per trial
///
/// 1. `on_init` — per-trial preparation on the main thread.
/// 2. `assign_start_time` — draw this trial's start offset (seconds from
///    trial start).  Called on the main thread with the session RNG, so
///    stochastic paradigms stay reproducible under a fixed seed.
/// 3. `on_trigger` — the action itself, on a dedicated thread, once the
///    wall clock reaches the scheduled time.  A returned error marks this
///    event's data missing for the trial but never aborts the trial.
///    Long-running implementations should poll `ctx.stop` and bail out
///    early when the session is stopping.
///
/// `on_cleanup` runs once at experiment end, after the last trial.
///
/// # Thread safety
///
/// `on_trigger` runs on its own thread while other events' triggers may be
/// in flight; the framework provides no mutual exclusion between events.
/// Keeping two events off the same physical resource at the same schedule
/// slot is the paradigm author's responsibility.
pub trait Triggerable: Send + 'static {
    /// Name of the action, unique within its trial type.  Used for data
    /// storage keys.
    fn name(&self) -> &str;

    /// Per-trial preparation (e.g. pre-rendering a waveform).  Runs on the
    /// main thread before the start offset is drawn.
    fn on_init(&mut self, _ctx: &TrialContext) -> HookResult<()> {
        Ok(())
    }

    /// Draw this trial's start offset in seconds from trial start.
    ///
    /// Most implementations hold a [`bx_core::TimeSpec`] and return
    /// `Ok(spec.sample(rng)?)`.
    fn assign_start_time(&mut self, rng: &mut SessionRng) -> HookResult<f64>;

    /// Perform the action.  Called once per trial on a dedicated thread at
    /// the scheduled time.
    fn on_trigger(&mut self, ctx: &TrialContext) -> HookResult<()>;

    /// One-time teardown at experiment end (e.g. deleting a temp file,
    /// releasing a pin).  Must be safe to skip for implementations with
    /// nothing to release.
    fn on_cleanup(&mut self) -> HookResult<()> {
        Ok(())
    }
}

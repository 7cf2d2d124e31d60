//! The optional video/recording collaborator.

/// A collaborator notified around each trial — typically a camera that
/// previews or records per-trial video files.
///
/// The session calls `start` just before a trial begins and `stop` right
/// after it completes.  Absence of a recorder is tolerated: registration is
/// optional and the session behaves identically without one.
pub trait Recorder {
    /// A trial is about to run.
    fn start(&mut self, trial_index: usize);

    /// The trial has completed.
    fn stop(&mut self);
}

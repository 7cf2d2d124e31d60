//! conditioning — a mock classical-conditioning paradigm for the rust_bx
//! framework.
//!
//! Two trial types, drawn 50/50: a small-reward trial (10 kHz tone) and a
//! large-reward trial (5 kHz tone).  In both, a 1 s tone plays at 1 s and
//! a reward is delivered at a normally distributed offset around 3 s, while
//! a mock 200 Hz lickometer samples continuously.  Swap the mock events
//! for GPIO/audio drivers to run this on a rig; the paradigm itself does
//! not change.
//!
//! Ctrl-C stops the session at the next trial boundary — the trial in
//! flight always completes and is persisted.

use std::path::Path;

use anyhow::Result;

use bx_core::{TimeDist, TimeSpec};
use bx_event::{MockEvent, MockMeasurement};
use bx_output::{CsvWriter, RecordingObserver, TrialWriter};
use bx_session::{ExperimentBuilder, SessionConfig, SessionData, SessionObserver, TrialRecord};
use bx_trial::TrialType;

// ── Constants ─────────────────────────────────────────────────────────────────

const N_TRIALS:     usize = 10;
const SEED:         u64   = 42;
const LICK_RATE_HZ: f64   = 200.0;
const TONE_START:   f64   = 1.0;
const TONE_SECS:    f64   = 1.0;
const END_PAD_SECS: f64   = 1.0;

// ── Observer wrapper: console progress around the CSV recorder ────────────────

struct ProgressObserver<W: TrialWriter> {
    inner: RecordingObserver<W>,
}

impl<W: TrialWriter> ProgressObserver<W> {
    fn new(inner: RecordingObserver<W>) -> Self {
        Self { inner }
    }
}

impl<W: TrialWriter> SessionObserver for ProgressObserver<W> {
    fn on_trial_start(&mut self, index: usize, name: &str) {
        println!("trial {:>2}: {name}", index + 1);
    }

    fn on_trigger_failed(&mut self, trial: usize, event: &str, error: &str) {
        eprintln!("  trial {trial}: event '{event}' failed: {error}");
    }

    fn on_trial_recorded(&mut self, record: &TrialRecord) {
        let licks = record
            .measurements
            .iter()
            .find(|m| m.name == "licks")
            .map(|m| m.t.len())
            .unwrap_or(0);
        println!(
            "  done in {:.2} s, {licks} lick samples",
            record.t_end - record.t_start
        );
        self.inner.on_trial_recorded(record);
    }

    fn on_session_end(&mut self, data: &SessionData) {
        self.inner.on_session_end(data);
    }
}

// ── Paradigm definition ───────────────────────────────────────────────────────

/// Reward time: normal around `mean`, bounded into (mean - 1, mean + 1).
fn reward_time(mean: f64) -> TimeSpec {
    TimeSpec::random(TimeDist::Normal { mean, sd: 0.3 }, mean - 1.0, mean + 1.0)
}

fn trial(name: &str, weight: f64, tone: &str, reward: &str, reward_hold: f64) -> Result<TrialType> {
    let tt = TrialType::new(name, weight)
        .with_event(Box::new(MockEvent::new(tone, TONE_START).with_hold(TONE_SECS)))?
        .with_event(Box::new(MockEvent::new(reward, reward_time(3.0)).with_hold(reward_hold)))?
        .with_end_pad(END_PAD_SECS);
    Ok(tt)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== conditioning — rust_bx mock paradigm ===");
    println!("Trials: {N_TRIALS}  |  Seed: {SEED}  |  Lickometer: {LICK_RATE_HZ} Hz");
    println!();

    // Inter-trial interval: exponential with 3 s mean, bounded to (1, 10) s.
    let iti = TimeSpec::random(TimeDist::Exponential { mean: 3.0 }, 1.0, 10.0);
    let config = SessionConfig::new(N_TRIALS, iti)
        .with_seed(SEED)
        .with_subject("demo-mouse")
        .with_condition("mock");

    let mut exp = ExperimentBuilder::new(config)
        .trial_type(trial("small_reward", 0.5, "tone_10k", "rew_small", 0.1)?)
        .trial_type(trial("large_reward", 0.5, "tone_5k", "rew_large", 0.25)?)
        .measurement(Box::new(MockMeasurement::new("licks", LICK_RATE_HZ)))
        .build()?;

    std::fs::create_dir_all("output/conditioning")?;
    let writer = CsvWriter::new(Path::new("output/conditioning"))?;
    let mut obs = ProgressObserver::new(RecordingObserver::new(writer));

    let data = exp.run(&mut obs)?;

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e} — session data is still in memory");
    }

    println!();
    println!(
        "Session {:?}: {} of {} trials recorded",
        data.outcome,
        data.trials.len(),
        data.info.n_trials
    );
    println!("CSV written to output/conditioning/");
    Ok(())
}

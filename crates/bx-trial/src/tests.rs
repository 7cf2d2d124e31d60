//! Unit tests for bx-trial.

use bx_core::{SessionClock, SessionRng, StopFlag};
use bx_event::{MockEvent, MockMeasurement, Pollable, TrialContext};

use crate::{TrialError, TrialType};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rng() -> SessionRng {
    SessionRng::from_seed(42)
}

/// A context whose trial starts "now" on a fresh clock.
fn fresh_ctx() -> TrialContext {
    let clock = SessionClock::start();
    TrialContext::new(0, clock.now(), clock, StopFlag::new())
}

fn planned_offsets(tt: &TrialType) -> Vec<(String, f64)> {
    tt.events()
        .iter()
        .map(|e| (e.name().to_string(), e.offset().unwrap()))
        .collect()
}

// ── Planning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plan {
    use super::*;

    #[test]
    fn orders_by_ascending_offset() {
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("late", 2.0)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("early", 0.5)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("mid", 1.0)))
            .unwrap();

        tt.plan(&fresh_ctx(), &mut rng()).unwrap();

        let names: Vec<String> = planned_offsets(&tt).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["early", "mid", "late"]);
    }

    #[test]
    fn ties_keep_registration_order() {
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("a", 1.0)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("b", 1.0)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("c", 0.0)))
            .unwrap();

        let ctx = fresh_ctx();
        let mut rng = rng();
        // Plan repeatedly: the sort must stay deterministic even though the
        // event vector is reordered between plans.
        for _ in 0..5 {
            tt.plan(&ctx, &mut rng).unwrap();
            let names: Vec<String> =
                planned_offsets(&tt).into_iter().map(|(n, _)| n).collect();
            assert_eq!(names, ["c", "a", "b"]);
        }
    }

    #[test]
    fn duplicate_event_name_rejected() {
        let mut tt = TrialType::new("t", 1.0);
        tt.add_event(Box::new(MockEvent::new("tone", 1.0))).unwrap();
        let err = tt.add_event(Box::new(MockEvent::new("tone", 2.0))).unwrap_err();
        assert!(matches!(err, TrialError::Config(_)));
    }
}

// ── Execution ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use std::sync::atomic::Ordering;

    use bx_core::SessionRng;
    use bx_event::{HookResult, Triggerable};

    use super::*;

    #[test]
    fn run_before_plan_is_a_config_error() {
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("tone", 0.0)))
            .unwrap();
        let err = tt.run_trial(&fresh_ctx(), &mut []).unwrap_err();
        assert!(matches!(err, TrialError::Config(_)));
    }

    #[test]
    fn zero_events_is_legal() {
        let mut tt = TrialType::new("bare", 1.0);
        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut []).unwrap();
        assert!(data.events.is_empty());
        assert!(data.measurements.is_empty());
    }

    #[test]
    fn events_fire_near_their_offsets() {
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("first", 0.1)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("second", 0.2)))
            .unwrap();

        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut []).unwrap();

        let first = &data.events[0];
        let second = &data.events[1];
        let t1 = first.t_start.unwrap();
        let t2 = second.t_start.unwrap();
        assert!(t1 >= 0.1 && t1 < 0.11, "first fired at {t1}");
        assert!(t2 >= 0.2 && t2 < 0.21, "second fired at {t2}");
    }

    #[test]
    fn offset_zero_fires_immediately() {
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("now", 0.0)))
            .unwrap();
        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut []).unwrap();
        let t = data.events[0].t_start.unwrap();
        assert!(t < 0.01, "fired at {t}");
    }

    #[test]
    fn trial_waits_for_slowest_event() {
        let clock = SessionClock::start();
        let ctx = TrialContext::new(0, clock.now(), clock, StopFlag::new());
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("slow", 0.0).with_hold(0.15)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("fast", 0.05)))
            .unwrap();

        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut []).unwrap();
        let elapsed = clock.now() - ctx.trial_start;

        assert!(elapsed >= 0.15, "returned after {elapsed}s, before the slow event finished");
        for event in &data.events {
            assert!(event.t_end.is_some(), "event '{}' missing t_end", event.name);
        }
    }

    #[test]
    fn overlapping_events_run_concurrently() {
        let clock = SessionClock::start();
        let ctx = TrialContext::new(0, clock.now(), clock, StopFlag::new());
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("a", 0.0).with_hold(0.15)))
            .unwrap()
            .with_event(Box::new(MockEvent::new("b", 0.0).with_hold(0.15)))
            .unwrap();

        tt.plan(&ctx, &mut rng()).unwrap();
        tt.run_trial(&ctx, &mut []).unwrap();
        let elapsed = clock.now() - ctx.trial_start;

        // Serial execution would take >= 0.3 s.
        assert!(elapsed < 0.27, "events appear to have run serially: {elapsed}s");
    }

    #[test]
    fn failed_trigger_does_not_abort_the_trial() {
        let good = MockEvent::new("good", 0.05);
        let triggers = good.trigger_counter();
        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(MockEvent::new("bad", 0.0).failing()))
            .unwrap()
            .with_event(Box::new(good))
            .unwrap();

        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut []).unwrap();

        let bad = data.events.iter().find(|e| e.name == "bad").unwrap();
        assert!(bad.t_start.is_some());
        assert!(bad.t_end.is_none());
        assert!(bad.error.is_some());

        let good = data.events.iter().find(|e| e.name == "good").unwrap();
        assert!(good.t_end.is_some());
        assert_eq!(triggers.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_trigger_is_isolated() {
        struct Exploding;
        impl Triggerable for Exploding {
            fn name(&self) -> &str {
                "exploding"
            }
            fn assign_start_time(&mut self, _: &mut SessionRng) -> HookResult<f64> {
                Ok(0.0)
            }
            fn on_trigger(&mut self, _: &TrialContext) -> HookResult<()> {
                panic!("driver bug");
            }
        }

        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(Exploding))
            .unwrap()
            .with_event(Box::new(MockEvent::new("steady", 0.05)))
            .unwrap();

        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut []).unwrap();

        let exploded = data.events.iter().find(|e| e.name == "exploding").unwrap();
        assert!(exploded.t_end.is_none());
        assert_eq!(exploded.error.as_deref(), Some("trigger thread panicked"));

        let steady = data.events.iter().find(|e| e.name == "steady").unwrap();
        assert!(steady.t_end.is_some());
    }

    #[test]
    fn end_pad_extends_the_trial() {
        let clock = SessionClock::start();
        let ctx = TrialContext::new(0, clock.now(), clock, StopFlag::new());
        let mut tt = TrialType::new("padded", 1.0).with_end_pad(0.1);
        tt.plan(&ctx, &mut rng()).unwrap();
        tt.run_trial(&ctx, &mut []).unwrap();
        let elapsed = clock.now() - ctx.trial_start;
        assert!(elapsed >= 0.1, "end pad not honored: {elapsed}s");
    }
}

// ── Measurements during a trial ───────────────────────────────────────────────

#[cfg(test)]
mod measurements {
    use super::*;

    #[test]
    fn hundred_hz_over_one_second() {
        let mut tt = TrialType::new("b", 1.0).with_end_pad(0.0);
        // A 1 s trial shaped by a single held event.
        tt.add_event(Box::new(MockEvent::new("hold", 0.0).with_hold(1.0))).unwrap();

        let mut measurements: Vec<Box<dyn Pollable>> =
            vec![Box::new(MockMeasurement::new("licks", 100.0))];

        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut measurements).unwrap();

        let trace = &data.measurements[0];
        assert_eq!(trace.name, "licks");
        let n = trace.t.len() as i64;
        assert!((98..=102).contains(&n), "got {n} samples");
    }

    #[test]
    fn sample_times_are_trial_normalized() {
        let mut tt = TrialType::new("t", 1.0).with_end_pad(0.2);
        let mut measurements: Vec<Box<dyn Pollable>> =
            vec![Box::new(MockMeasurement::new("licks", 200.0))];

        let ctx = fresh_ctx();
        tt.plan(&ctx, &mut rng()).unwrap();
        let data = tt.run_trial(&ctx, &mut measurements).unwrap();

        let trace = &data.measurements[0];
        assert!(!trace.t.is_empty());
        assert_eq!(trace.t.len(), trace.values.len());
        for &t in &trace.t {
            assert!(t >= 0.0, "negative normalized time {t}");
            assert!(t < 0.5, "sample at {t} far past trial end");
        }
    }

    #[test]
    fn sequences_do_not_leak_across_trials() {
        let mut tt = TrialType::new("t", 1.0).with_end_pad(0.1);
        let mut measurements: Vec<Box<dyn Pollable>> =
            vec![Box::new(MockMeasurement::new("licks", 200.0))];

        let clock = SessionClock::start();
        let mut rng = rng();

        let ctx1 = TrialContext::new(0, clock.now(), clock, StopFlag::new());
        tt.plan(&ctx1, &mut rng).unwrap();
        let first = tt.run_trial(&ctx1, &mut measurements).unwrap();

        let ctx2 = TrialContext::new(1, clock.now(), clock, StopFlag::new());
        tt.plan(&ctx2, &mut rng).unwrap();
        let second = tt.run_trial(&ctx2, &mut measurements).unwrap();

        let n1 = first.measurements[0].t.len() as i64;
        let n2 = second.measurements[0].t.len() as i64;
        assert!((n1 - n2).abs() <= 3, "trial sequences differ wildly: {n1} vs {n2}");
    }
}

// ── Cleanup ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cleanup {
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn cleanup_hits_every_event_once() {
        let a = MockEvent::new("a", 0.0);
        let b = MockEvent::new("b", 1.0);
        let ca = a.cleanup_counter();
        let cb = b.cleanup_counter();

        let mut tt = TrialType::new("t", 1.0)
            .with_event(Box::new(a))
            .unwrap()
            .with_event(Box::new(b))
            .unwrap();

        assert!(tt.cleanup().is_empty());
        assert!(tt.cleanup().is_empty()); // second pass is a no-op
        assert_eq!(ca.load(Ordering::SeqCst), 1);
        assert_eq!(cb.load(Ordering::SeqCst), 1);
    }
}

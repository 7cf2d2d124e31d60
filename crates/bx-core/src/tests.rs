//! Unit tests for bx-core primitives.

#[cfg(test)]
mod time_spec {
    use crate::{CoreError, SessionRng, TimeDist, TimeSpec};

    fn rng() -> SessionRng {
        SessionRng::from_seed(42)
    }

    #[test]
    fn fixed_returns_scalar_unchanged() {
        let spec = TimeSpec::Fixed(3.25);
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(spec.sample(&mut rng).unwrap(), 3.25);
        }
    }

    #[test]
    fn fixed_does_not_consume_rng() {
        let mut a = rng();
        let mut b = rng();
        let spec = TimeSpec::Fixed(1.0);
        for _ in 0..10 {
            spec.sample(&mut a).unwrap();
        }
        // Both RNGs must still be in lockstep.
        let va: f64 = a.gen_range(0.0..1.0);
        let vb: f64 = b.gen_range(0.0..1.0);
        assert_eq!(va, vb);
    }

    #[test]
    fn uniform_respects_strict_bounds() {
        let spec = TimeSpec::random(TimeDist::Uniform { low: 0.0, high: 10.0 }, 2.0, 4.0);
        let mut rng = rng();
        for _ in 0..5_000 {
            let v = spec.sample(&mut rng).unwrap();
            assert!(v > 2.0 && v < 4.0, "sample {v} escaped (2, 4)");
        }
    }

    #[test]
    fn normal_respects_strict_bounds() {
        let spec = TimeSpec::random(TimeDist::Normal { mean: 6.0, sd: 1.0 }, 5.0, 7.0);
        let mut rng = rng();
        for _ in 0..5_000 {
            let v = spec.sample(&mut rng).unwrap();
            assert!(v > 5.0 && v < 7.0, "sample {v} escaped (5, 7)");
        }
    }

    #[test]
    fn exponential_respects_strict_bounds() {
        let spec = TimeSpec::random(TimeDist::Exponential { mean: 2.0 }, 0.5, 8.0);
        let mut rng = rng();
        for _ in 0..5_000 {
            let v = spec.sample(&mut rng).unwrap();
            assert!(v > 0.5 && v < 8.0, "sample {v} escaped (0.5, 8)");
        }
    }

    #[test]
    fn impossible_window_fails_fast() {
        // Uniform over [0, 1) can never land inside (5, 6).
        let spec = TimeSpec::random(TimeDist::Uniform { low: 0.0, high: 1.0 }, 5.0, 6.0);
        let mut rng = rng();
        match spec.sample(&mut rng) {
            Err(CoreError::SamplingExhausted { attempts, .. }) => {
                assert_eq!(attempts, crate::MAX_SAMPLE_ATTEMPTS);
            }
            other => panic!("expected SamplingExhausted, got {other:?}"),
        }
    }

    #[test]
    fn invalid_specs_are_config_errors() {
        let mut rng = rng();
        let bad = [
            TimeSpec::Fixed(-1.0),
            TimeSpec::Fixed(f64::NAN),
            TimeSpec::random(TimeDist::Uniform { low: 2.0, high: 1.0 }, 0.0, 5.0),
            TimeSpec::random(TimeDist::Normal { mean: 1.0, sd: 0.0 }, 0.0, 5.0),
            TimeSpec::random(TimeDist::Exponential { mean: -3.0 }, 0.0, 5.0),
            TimeSpec::random(TimeDist::Normal { mean: 1.0, sd: 1.0 }, 5.0, 5.0),
        ];
        for spec in bad {
            assert!(
                matches!(spec.sample(&mut rng), Err(CoreError::Config(_))),
                "{spec:?} should be a config error"
            );
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let spec = TimeSpec::random(TimeDist::Normal { mean: 3.0, sd: 0.5 }, 1.0, 5.0);
        let mut a = SessionRng::from_seed(7);
        let mut b = SessionRng::from_seed(7);
        for _ in 0..100 {
            assert_eq!(spec.sample(&mut a).unwrap(), spec.sample(&mut b).unwrap());
        }
    }
}

#[cfg(test)]
mod clock {
    use std::time::Duration;

    use crate::SessionClock;

    #[test]
    fn now_is_monotonic_nondecreasing() {
        let clock = SessionClock::start();
        let mut prev = clock.now();
        for _ in 0..100 {
            let t = clock.now();
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn now_tracks_elapsed_time() {
        let clock = SessionClock::start();
        std::thread::sleep(Duration::from_millis(50));
        let t = clock.now();
        assert!(t >= 0.050, "got {t}");
        assert!(t < 0.5, "got {t}");
    }

    #[test]
    fn copies_share_the_anchor() {
        let clock = SessionClock::start();
        let copy = clock;
        std::thread::sleep(Duration::from_millis(10));
        assert!((clock.now() - copy.now()).abs() < 0.005);
    }
}

#[cfg(test)]
mod rng {
    use crate::SessionRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SessionRng::from_seed(12345);
        let mut r2 = SessionRng::from_seed(12345);
        for _ in 0..100 {
            let a: f64 = r1.gen_range(0.0..1.0);
            let b: f64 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SessionRng::from_seed(0);
        for _ in 0..1000 {
            let v: f64 = rng.gen_range(0.0..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SessionRng::from_seed(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod stop {
    use crate::StopFlag;

    #[test]
    fn set_clear_roundtrip() {
        let flag = StopFlag::new();
        assert!(!flag.is_set());
        flag.set();
        assert!(flag.is_set());
        flag.set(); // idempotent
        assert!(flag.is_set());
        flag.clear();
        assert!(!flag.is_set());
    }

    #[test]
    fn clones_share_state() {
        let flag = StopFlag::new();
        let clone = flag.clone();
        clone.set();
        assert!(flag.is_set());
    }

    #[test]
    fn visible_across_threads() {
        let flag = StopFlag::new();
        let clone = flag.clone();
        let handle = std::thread::spawn(move || clone.set());
        handle.join().unwrap();
        assert!(flag.is_set());
    }
}

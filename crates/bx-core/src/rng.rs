//! Session-level random state.
//!
//! A single `SessionRng` drives every random decision in a run: trial-type
//! selection, event start offsets, and inter-trial intervals.  It is owned
//! by the experiment driver and touched only from the main thread — event
//! trigger threads and measurement polling threads never draw from it, so
//! no synchronisation is needed and seeded runs replay their full schedule
//! exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Deterministic (when seeded) random source for one experimental session.
pub struct SessionRng(SmallRng);

impl SessionRng {
    /// Seed deterministically — the same seed always produces the same
    /// trial sequence and timing draws.
    pub fn from_seed(seed: u64) -> Self {
        SessionRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy, for live sessions where replay is not needed.
    pub fn from_entropy() -> Self {
        SessionRng(SmallRng::from_entropy())
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`dist.sample(rng.inner())`, etc.).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

//! Deterministic simulation RNG and the pluggable choice capability.
//!
//! Anything in the park that picks "one of N" at random (e.g. the subtype of
//! a ride placed without an explicit kind) goes through the [`Chooser`]
//! trait rather than a global random source.  Production code passes a
//! seeded [`SimRng`]; tests pass a [`FixedChooser`] so outcomes are exact.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── Chooser ───────────────────────────────────────────────────────────────────

/// Picks an index uniformly from `0..len`.
pub trait Chooser {
    /// Returns `None` if `len == 0`.
    fn choose_index(&mut self, len: usize) -> Option<usize>;
}

/// Always picks the same position, wrapped into range.
#[derive(Copy, Clone, Debug, Default)]
pub struct FixedChooser(pub usize);

impl Chooser for FixedChooser {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.0 % len)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (ride placement, arrivals).
///
/// Used only from the single-threaded park driver.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl Chooser for SimRng {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.0.gen_range(0..len))
    }
}

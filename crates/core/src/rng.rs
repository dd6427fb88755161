//! RNG module - seeded randomness for spawn positions and escalation balls
//!
//! Wraps a seedable `StdRng` so that a match replays identically for a given
//! seed (handy for tests and benchmarks), while the binary seeds from the
//! clock.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::FIELD_WIDTH;

#[derive(Debug, Clone)]
pub struct FieldRng {
    rng: StdRng,
    seed: u64,
}

impl FieldRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform x in `[0, FIELD_WIDTH)`.
    pub fn spawn_x(&mut self) -> i32 {
        self.rng.gen_range(0..FIELD_WIDTH)
    }

    /// Uniform integer in `[lo, hi]`, both included.
    ///
    /// An empty or degenerate range (`hi <= lo`) yields 0.
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return 0;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform colour channel in `[0, 255]`.
    pub fn channel(&mut self) -> u8 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = FieldRng::new(42);
        let mut b = FieldRng::new(42);
        for _ in 0..64 {
            assert_eq!(a.spawn_x(), b.spawn_x());
            assert_eq!(a.between(3, 6), b.between(3, 6));
        }
    }

    #[test]
    fn spawn_x_stays_inside_field() {
        let mut rng = FieldRng::new(7);
        for _ in 0..1000 {
            let x = rng.spawn_x();
            assert!((0..FIELD_WIDTH).contains(&x));
        }
    }

    #[test]
    fn between_is_inclusive() {
        let mut rng = FieldRng::new(99);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..1000 {
            let v = rng.between(3, 6);
            assert!((3..=6).contains(&v));
            seen_lo |= v == 3;
            seen_hi |= v == 6;
        }
        assert!(seen_lo && seen_hi);
    }

    #[test]
    fn between_degenerate_range_is_zero() {
        let mut rng = FieldRng::new(1);
        assert_eq!(rng.between(5, 5), 0);
        assert_eq!(rng.between(6, 3), 0);
    }
}

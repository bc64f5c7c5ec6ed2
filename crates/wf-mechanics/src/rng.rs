//! Seeded random sequence generator.
//!
//! Resolution logic consumes values from one [`Rsg`] in a fixed order, so
//! the same seed followed by the same ordered sequence of draws yields the
//! same values in every process and on every platform.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A deterministic pseudo-random source seeded from a 64-bit value.
#[derive(Debug, Clone)]
pub struct Rsg {
    seed: u64,
    rng: StdRng,
    draws: u64,
}

impl Rsg {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Discard all state and start over from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// The seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// How many values have been drawn since seeding.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw the next value over the full `u64` range.
    pub fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.rng.next_u64()
    }

    /// Draw a uniform value in `1..=sides`. A zero-sided die counts as one side.
    pub fn roll(&mut self, sides: u32) -> u32 {
        self.draws += 1;
        self.rng.random_range(1..=sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rsg::new(42);
        let mut b = Rsg::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
            assert_eq!(a.roll(20), b.roll(20));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Rsg::new(1);
        let mut b = Rsg::new(2);
        let xs: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut rsg = Rsg::new(7);
        for _ in 0..500 {
            let v = rsg.roll(6);
            assert!((1..=6).contains(&v));
        }
        assert_eq!(rsg.roll(0), 1);
        assert_eq!(rsg.roll(1), 1);
    }

    #[test]
    fn counts_draws() {
        let mut rsg = Rsg::new(3);
        rsg.roll(20);
        rsg.next_u64();
        assert_eq!(rsg.draws(), 2);
        assert_eq!(rsg.seed(), 3);
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut rsg = Rsg::new(9);
        let first = rsg.roll(100);
        rsg.roll(100);
        rsg.reseed(9);
        assert_eq!(rsg.draws(), 0);
        assert_eq!(rsg.roll(100), first);
    }
}

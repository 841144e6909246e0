//! Injectable randomness for the reliability draw during allocation.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform draws in `[0, 1)` consumed by the allocation pass.
///
/// Allocation draws exactly once per placed panel, in lot order then
/// row-major cell order, so a seeded implementation makes working/broken
/// assignments reproducible. Tests can inject a scripted implementation to
/// force specific patterns.
pub trait ReliabilitySampler {
    /// Returns the next uniform value in `[0, 1)`.
    fn sample(&mut self) -> f32;
}

/// Deterministic sampler backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    /// Creates a sampler seeded for reproducible draw sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReliabilitySampler for SeededSampler {
    fn sample(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededSampler::new(2023);
        let mut b = SeededSampler::new(2023);
        for _ in 0..32 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededSampler::new(2023);
        let mut b = SeededSampler::new(2024);
        let diverged = (0..32).any(|_| a.sample() != b.sample());
        assert!(diverged);
    }

    #[test]
    fn samples_stay_in_unit_interval() {
        let mut s = SeededSampler::new(7);
        for _ in 0..256 {
            let v = s.sample();
            assert!((0.0..1.0).contains(&v));
        }
    }
}

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Decides how many levels a freshly inserted node spans.
///
/// Called exactly once per insertion. Must return a value `>= 1`; the set
/// treats `0` as `1`. There is no upper bound: the set grows its sentinel
/// spine to fit whatever is drawn.
pub trait LevelOracle {
    fn sample_level(&mut self) -> usize;
}

impl<L: LevelOracle + ?Sized> LevelOracle for &mut L {
    fn sample_level(&mut self) -> usize {
        (**self).sample_level()
    }
}

impl<L: LevelOracle + ?Sized> LevelOracle for Box<L> {
    fn sample_level(&mut self) -> usize {
        (**self).sample_level()
    }
}

/// Geometric level sampler: level `L` is drawn with probability `2^-L`.
///
/// Each draw counts the trailing one-bits of 64-bit words from the
/// underlying generator, so every bit is a fair coin flip. A word made of
/// ones continues the count into the next word.
///
/// Cloning reseeds: the clone's generator is seeded from a copy of this
/// one, so the two draw unrelated level sequences while the clone stays
/// reproducible for a seeded source.
#[derive(Debug)]
pub struct GeometricLevels<R = StdRng> {
    rng: R,
}

impl<R: RngCore + SeedableRng + Clone> Clone for GeometricLevels<R> {
    fn clone(&self) -> Self {
        let rng = R::from_rng(self.rng.clone()).unwrap_or_else(|_| self.rng.clone());
        GeometricLevels { rng }
    }
}

impl GeometricLevels<StdRng> {
    /// Seeded from OS entropy. Level sequences differ run to run.
    pub fn from_entropy() -> Self {
        GeometricLevels {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for reproducible tests.
    pub fn seed_from_u64(seed: u64) -> Self {
        GeometricLevels {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> GeometricLevels<R> {
    /// Wrap any bit source.
    pub fn from_rng(rng: R) -> Self {
        GeometricLevels { rng }
    }
}

impl Default for GeometricLevels<StdRng> {
    fn default() -> Self {
        GeometricLevels::from_entropy()
    }
}

impl<R: RngCore> LevelOracle for GeometricLevels<R> {
    fn sample_level(&mut self) -> usize {
        let mut level = 1;
        loop {
            let ones = self.rng.next_u64().trailing_ones() as usize;
            level += ones;
            if ones < u64::BITS as usize {
                return level;
            }
        }
    }
}

//! Uniform tie-breaking among equally ranked candidates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one index out of `len` equally likely choices.
///
/// Any [`Rng`] is a uniform tie-breaker. Tests substitute a
/// [`SequenceTieBreaker`] to make the final pick deterministic.
pub trait TieBreaker {
    /// Returns an index in `0..len`. `len` is always at least 1.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> TieBreaker for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Creates the engine's random source from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a recorded sequence of picks, cycling when exhausted.
///
/// Each recorded value is reduced modulo the tie size, so any sequence
/// is valid for any tie.
///
/// # Examples
///
/// ```
/// use roll_call::decision::{SequenceTieBreaker, TieBreaker};
///
/// let mut tb = SequenceTieBreaker::new(vec![1, 5]);
/// assert_eq!(tb.pick(3), 1);
/// assert_eq!(tb.pick(3), 2);
/// assert_eq!(tb.pick(3), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceTieBreaker {
    picks: Vec<usize>,
    cursor: usize,
}

impl SequenceTieBreaker {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }

    /// Always picks the first of the tied candidates.
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl TieBreaker for SequenceTieBreaker {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let raw = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        raw % len
    }
}

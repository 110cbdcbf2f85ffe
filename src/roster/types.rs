//! Candidate record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Stored score of a candidate. Bounded to `0..=Score::MAX`.
pub type Score = u8;

/// A student on the roster.
///
/// The name is the identity and never changes. The score moves by one
/// step at a time through [`increment`](Self::increment) and
/// [`decrement`](Self::decrement), saturating at both ends.
///
/// # Examples
///
/// ```
/// use roll_call::roster::Candidate;
///
/// let mut c = Candidate::new("Ada", "21INB-1", 0);
/// assert!(!c.decrement());
/// assert_eq!(c.score(), 0);
/// assert!(c.increment());
/// assert_eq!(c.score(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    name: String,
    group: String,
    score: Score,
}

impl Candidate {
    pub fn new(name: impl Into<String>, group: impl Into<String>, score: Score) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            score,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seminar group tag, e.g. `21INB-1`.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Raises the score by one. Returns `false` (and logs) when already at
    /// the maximum.
    pub fn increment(&mut self) -> bool {
        match self.score.checked_add(1) {
            Some(next) => {
                self.score = next;
                true
            }
            None => {
                warn!(
                    student = %self.name,
                    "student already has the maximum of {} points",
                    Score::MAX
                );
                false
            }
        }
    }

    /// Lowers the score by one. Returns `false` (and logs) when already 0.
    pub fn decrement(&mut self) -> bool {
        if self.score > 0 {
            self.score -= 1;
            true
        } else {
            warn!(
                student = %self.name,
                "student has no points to lose (already 0 points)"
            );
            false
        }
    }
}

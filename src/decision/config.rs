//! Decision configuration.

use super::types::Priority;
use crate::roster::Score;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for one decision run.
///
/// # Examples
///
/// ```
/// use roll_call::decision::DecisionConfig;
///
/// let config = DecisionConfig::default()
///     .with_preferred_score(2)
///     .with_target_group("21INB-1")
///     .with_group_weight(3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecisionConfig {
    /// Score the called-on student should be closest to.
    ///
    /// Students at or below it are preferred over students above it.
    pub preferred_score: Score,

    /// Priority added to students of the target group.
    pub group_weight: Priority,

    /// Priority added to students whose cohort differs from the target
    /// group's cohort.
    pub repeat_weight: Priority,

    /// Seminar group taught in this session. Group and repeat rules are
    /// skipped without one.
    pub target_group: Option<String>,

    /// Report skipped students.
    pub verbose: bool,

    /// Random seed for the tie-break. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            preferred_score: 0,
            group_weight: 2,
            repeat_weight: 1,
            target_group: None,
            verbose: false,
            seed: None,
        }
    }
}

impl DecisionConfig {
    pub fn with_preferred_score(mut self, score: Score) -> Self {
        self.preferred_score = score;
        self
    }

    pub fn with_group_weight(mut self, weight: Priority) -> Self {
        self.group_weight = weight;
        self
    }

    pub fn with_repeat_weight(mut self, weight: Priority) -> Self {
        self.repeat_weight = weight;
        self
    }

    pub fn with_target_group(mut self, group: impl Into<String>) -> Self {
        self.target_group = Some(group.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(group) = &self.target_group {
            if group.trim().is_empty() {
                return Err("target_group must not be empty".into());
            }
        }
        Ok(())
    }
}

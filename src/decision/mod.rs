//! Rule-chain decision engine.
//!
//! Narrows a working set of selected students down to one:
//!
//! - **Preferred score**: keep the students whose points are closest to
//!   the preferred value, searching downward before upward.
//! - **Prioritization**: reward the target seminar group and students
//!   repeating the course, then keep only the top priority.
//! - **Position**: among the remaining, keep those seated furthest forward.
//! - **Tie-break**: draw uniformly at random from whoever is left.
//!
//! The random source is injectable through [`TieBreaker`], so runs can be
//! made fully deterministic.

mod config;
mod engine;
mod rules;
mod tie_break;
mod types;

pub use config::DecisionConfig;
pub use engine::{adjust_scores, DecisionEngine};
pub use rules::{
    closest_at_or_above, closest_at_or_below, FrontmostRow, GroupMatch, MaxPriority, PreferredScore,
    RepeatIndicator, Rule, RuleContext,
};
pub use tie_break::{create_rng, SequenceTieBreaker, TieBreaker};
pub use types::{Decision, DecisionResult, PhaseTrace, Priority, PriorityTable};

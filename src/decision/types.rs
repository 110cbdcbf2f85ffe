//! Working state and outcome of one decision.

use crate::roster::Roster;
use crate::selection::SelectionMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Rule-derived rank of a candidate within one decision. Higher wins.
pub type Priority = u32;

/// Candidate name -> accumulated priority.
///
/// Entries are only ever removed or have their priority raised, so
/// membership shrinks and priorities grow monotonically over a decision.
/// Iteration is in lexical name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityTable {
    entries: BTreeMap<String, Priority>,
}

impl PriorityTable {
    /// Seeds the table with priority 0 for every selected name found in
    /// the roster. Unknown names are dropped and, when `verbose`, logged.
    pub fn from_selection(roster: &Roster, selection: &SelectionMap, verbose: bool) -> Self {
        let mut entries = BTreeMap::new();
        for name in selection.names() {
            if roster.get(name).is_some() {
                entries.entry(name.to_string()).or_insert(0);
            } else if verbose {
                info!(student = name, "student does not exist in roster, skipping");
            } else {
                debug!(student = name, "unknown student skipped");
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn priority(&self, name: &str) -> Option<Priority> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Priority)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), *p))
    }

    /// Highest priority present, or 0 when empty.
    pub fn max_priority(&self) -> Priority {
        self.entries.values().copied().max().unwrap_or(0)
    }

    /// Adds `weight` to the named entry (saturating). Absent names are ignored.
    pub fn reward(&mut self, name: &str, weight: Priority) {
        if let Some(p) = self.entries.get_mut(name) {
            *p = p.saturating_add(weight);
        }
    }

    /// Keeps only entries whose name is in `survivors`.
    pub fn retain_names(&mut self, survivors: &BTreeSet<String>) {
        self.entries.retain(|name, _| survivors.contains(name));
    }

    /// Keeps only entries with at least `floor` priority.
    pub fn retain_at_least(&mut self, floor: Priority) {
        self.entries.retain(|_, p| *p >= floor);
    }
}

impl FromIterator<(String, Priority)> for PriorityTable {
    fn from_iter<I: IntoIterator<Item = (String, Priority)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a decision run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The named student was chosen.
    Chosen(String),
    /// No selected student exists in the roster.
    NoValidSelection,
}

impl Decision {
    pub fn chosen(&self) -> Option<&str> {
        match self {
            Decision::Chosen(name) => Some(name),
            Decision::NoValidSelection => None,
        }
    }
}

/// Working-set size after one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTrace {
    pub rule: String,
    pub remaining: usize,
}

/// Result of [`DecisionEngine::decide`](super::DecisionEngine::decide).
#[derive(Debug, Clone)]
pub struct DecisionResult {
    /// The chosen student, if any.
    pub decision: Decision,

    /// Number of valid candidates before any rule ran.
    pub candidates_considered: usize,

    /// Number of candidates left for the random tie-break.
    pub tied: usize,

    /// Working-set size after each rule, in application order.
    pub trace: Vec<PhaseTrace>,
}

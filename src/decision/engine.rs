//! Decision engine: runs the rule chain and breaks the final tie.

use super::config::DecisionConfig;
use super::rules::{FrontmostRow, GroupMatch, MaxPriority, PreferredScore, RepeatIndicator, Rule, RuleContext};
use super::tie_break::{create_rng, TieBreaker};
use super::types::{Decision, DecisionResult, PhaseTrace, PriorityTable};
use crate::error::{Error, Result};
use crate::roster::{Adjustment, Roster, Score};
use crate::selection::SelectionMap;
use tracing::debug;

/// Picks one student out of a selection.
///
/// Rules run in a fixed order:
///
/// 1. [`PreferredScore`]: keep students closest to the preferred score
/// 2. [`GroupMatch`]: reward the target group
/// 3. [`RepeatIndicator`]: reward repeating students
/// 4. [`MaxPriority`]: keep the highest priority
/// 5. [`FrontmostRow`]: keep the front-most seated
///
/// Whoever is left is drawn uniformly at random.
///
/// # Examples
///
/// ```
/// use roll_call::decision::{DecisionConfig, DecisionEngine};
/// use roll_call::roster::{Candidate, Roster};
/// use roll_call::selection::SelectionMap;
///
/// let roster = Roster::new("students.csv", vec![
///     Candidate::new("Ada", "21INB-1", 0),
///     Candidate::new("Bob", "21INB-1", 3),
/// ]);
/// let selection = SelectionMap::single_row(["Ada", "Bob"]);
/// let engine = DecisionEngine::new(&roster, DecisionConfig::default(), &selection).unwrap();
///
/// let result = engine.decide().unwrap();
/// assert_eq!(result.decision.chosen(), Some("Ada"));
/// ```
pub struct DecisionEngine<'a> {
    roster: &'a Roster,
    config: DecisionConfig,
    selection: &'a SelectionMap,
    table: PriorityTable,
    rules: Vec<Box<dyn Rule>>,
}

impl<'a> DecisionEngine<'a> {
    /// Builds the working set from every selected student found in the roster.
    pub fn new(roster: &'a Roster, config: DecisionConfig, selection: &'a SelectionMap) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        let table = PriorityTable::from_selection(roster, selection, config.verbose);
        Ok(Self {
            roster,
            config,
            selection,
            table,
            rules: vec![
                Box::new(PreferredScore),
                Box::new(GroupMatch),
                Box::new(RepeatIndicator),
                Box::new(MaxPriority),
                Box::new(FrontmostRow),
            ],
        })
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Current working set.
    pub fn table(&self) -> &PriorityTable {
        &self.table
    }

    /// Returns the names of all rules in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs the chain, seeding the tie-break from the configured seed or
    /// from OS entropy.
    pub fn decide(self) -> Result<DecisionResult> {
        let mut rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        self.decide_with(&mut rng)
    }

    /// Runs the chain with a caller-supplied tie-breaker.
    pub fn decide_with<T: TieBreaker + ?Sized>(mut self, tie_breaker: &mut T) -> Result<DecisionResult> {
        let candidates_considered = self.table.len();
        if self.table.is_empty() {
            debug!("no valid students in selection");
            return Ok(DecisionResult {
                decision: Decision::NoValidSelection,
                candidates_considered,
                tied: 0,
                trace: Vec::new(),
            });
        }

        let ctx = RuleContext {
            roster: self.roster,
            config: &self.config,
            selection: self.selection,
        };
        let mut trace = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            rule.apply(&mut self.table, &ctx)?;
            debug!(rule = rule.name(), remaining = self.table.len(), "rule applied");
            trace.push(PhaseTrace {
                rule: rule.name().to_string(),
                remaining: self.table.len(),
            });
        }

        let tied: Vec<&str> = self.table.names().collect();
        let winner = match tied.len() {
            // Only reachable through a custom rule set emptying the table.
            0 => return Err(Error::EmptySelection),
            1 => tied[0],
            n => tied[tie_breaker.pick(n)],
        };
        debug!(winner, tied = tied.len(), "student chosen");

        Ok(DecisionResult {
            decision: Decision::Chosen(winner.to_string()),
            candidates_considered,
            tied: tied.len(),
            trace,
        })
    }
}

/// Moves every selected student's score by one point, bypassing the rules.
///
/// Returns each adjusted student with the new score. Nothing is written
/// to disk; call [`Roster::persist`] once afterwards.
pub fn adjust_scores(
    roster: &mut Roster,
    selection: &SelectionMap,
    adjustment: Adjustment,
    verbose: bool,
) -> Result<Vec<(String, Score)>> {
    let table = PriorityTable::from_selection(roster, selection, verbose);
    if table.is_empty() {
        return Err(Error::EmptySelection);
    }
    let names: Vec<String> = table.names().map(str::to_string).collect();

    let mut updated = roster.clone();
    let mut changes = Vec::with_capacity(names.len());
    for name in names {
        let score = updated.adjust(&name, adjustment)?;
        debug!(student = %name, score, ?adjustment, "score adjusted");
        changes.push((name, score));
    }
    *roster = updated;
    Ok(changes)
}

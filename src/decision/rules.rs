//! The rule chain.
//!
//! Each rule narrows or re-ranks the [`PriorityTable`] in place. Filters
//! remove entries, prioritizers raise priorities; no rule does both.

use super::config::DecisionConfig;
use super::types::PriorityTable;
use crate::error::{Error, Result};
use crate::roster::{Roster, Score};
use crate::selection::SelectionMap;
use std::collections::BTreeSet;

/// Read-only inputs shared by every rule of one decision.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub roster: &'a Roster,
    pub config: &'a DecisionConfig,
    pub selection: &'a SelectionMap,
}

/// A step of the decision chain.
pub trait Rule {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Applies the rule to the working set.
    fn apply(&self, table: &mut PriorityTable, ctx: &RuleContext<'_>) -> Result<()>;
}

/// Names in `table` whose roster score equals `score`.
fn with_score(score: Score, table: &PriorityTable, roster: &Roster) -> BTreeSet<String> {
    table
        .names()
        .filter(|name| roster.get(name).is_some_and(|c| c.score() == score))
        .map(str::to_string)
        .collect()
}

/// Names whose score is the largest value `<= threshold` held by anyone in
/// `table`. Empty when every score is above `threshold`.
pub fn closest_at_or_below(threshold: Score, table: &PriorityTable, roster: &Roster) -> BTreeSet<String> {
    let mut score = threshold;
    loop {
        let found = with_score(score, table, roster);
        if !found.is_empty() {
            return found;
        }
        match score.checked_sub(1) {
            Some(next) => score = next,
            None => return BTreeSet::new(),
        }
    }
}

/// Names whose score is the smallest value `>= threshold` held by anyone in
/// `table`. Empty when every score is below `threshold`.
pub fn closest_at_or_above(threshold: Score, table: &PriorityTable, roster: &Roster) -> BTreeSet<String> {
    let mut score = threshold;
    loop {
        let found = with_score(score, table, roster);
        if !found.is_empty() {
            return found;
        }
        match score.checked_add(1) {
            Some(next) => score = next,
            None => return BTreeSet::new(),
        }
    }
}

/// Keeps the students whose score is closest to the preferred score,
/// looking downward first and upward from `preferred + 1` only when
/// nobody is at or below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredScore;

impl Rule for PreferredScore {
    fn name(&self) -> &str {
        "PreferredScore"
    }

    fn apply(&self, table: &mut PriorityTable, ctx: &RuleContext<'_>) -> Result<()> {
        let preferred = ctx.config.preferred_score;
        let mut remaining = closest_at_or_below(preferred, table, ctx.roster);
        if remaining.is_empty() {
            if let Some(above) = preferred.checked_add(1) {
                remaining = closest_at_or_above(above, table, ctx.roster);
            }
        }
        table.retain_names(&remaining);
        Ok(())
    }
}

/// Rewards students belonging to the target group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupMatch;

impl Rule for GroupMatch {
    fn name(&self) -> &str {
        "GroupMatch"
    }

    fn apply(&self, table: &mut PriorityTable, ctx: &RuleContext<'_>) -> Result<()> {
        let Some(target) = ctx.config.target_group.as_deref() else {
            return Ok(());
        };
        let members: Vec<String> = table
            .names()
            .filter(|name| ctx.roster.get(name).is_some_and(|c| c.group() == target))
            .map(str::to_string)
            .collect();
        for name in &members {
            table.reward(name, ctx.config.group_weight);
        }
        Ok(())
    }
}

/// Character position in a group tag that encodes the cohort.
const COHORT_POSITION: usize = 1;

fn cohort_marker(tag: &str) -> Result<char> {
    tag.chars()
        .nth(COHORT_POSITION)
        .ok_or_else(|| Error::MalformedGroupTag { tag: tag.to_string() })
}

/// Rewards students repeating a course: their group tag's cohort character
/// differs from the target group's.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatIndicator;

impl Rule for RepeatIndicator {
    fn name(&self) -> &str {
        "RepeatIndicator"
    }

    fn apply(&self, table: &mut PriorityTable, ctx: &RuleContext<'_>) -> Result<()> {
        let Some(target) = ctx.config.target_group.as_deref() else {
            return Ok(());
        };
        let target_cohort = cohort_marker(target)?;

        let mut repeaters = Vec::new();
        for name in table.names() {
            let Some(candidate) = ctx.roster.get(name) else {
                continue;
            };
            if cohort_marker(candidate.group())? != target_cohort {
                repeaters.push(name.to_string());
            }
        }
        for name in &repeaters {
            table.reward(name, ctx.config.repeat_weight);
        }
        Ok(())
    }
}

/// Keeps only the entries holding the highest priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPriority;

impl Rule for MaxPriority {
    fn name(&self) -> &str {
        "MaxPriority"
    }

    fn apply(&self, table: &mut PriorityTable, _ctx: &RuleContext<'_>) -> Result<()> {
        let max = table.max_priority();
        table.retain_at_least(max);
        Ok(())
    }
}

/// Keeps the remaining students seated furthest forward.
///
/// No-op with a single row or a single remaining student.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontmostRow;

impl Rule for FrontmostRow {
    fn name(&self) -> &str {
        "FrontmostRow"
    }

    fn apply(&self, table: &mut PriorityTable, ctx: &RuleContext<'_>) -> Result<()> {
        if ctx.selection.row_count() <= 1 || table.len() <= 1 {
            return Ok(());
        }
        for (_, seated) in ctx.selection.rows() {
            let front: BTreeSet<String> = seated
                .iter()
                .filter(|name| table.contains(name))
                .cloned()
                .collect();
            if !front.is_empty() {
                table.retain_names(&front);
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Candidate;

    fn roster() -> Roster {
        Roster::new(
            "unused.csv",
            vec![
                Candidate::new("A", "21INB-1", 0),
                Candidate::new("B", "21INB-1", 4),
                Candidate::new("C", "20INB-1", 1),
                Candidate::new("D", "21INB-2", 1),
                Candidate::new("E", "20INB-2", 1),
            ],
        )
    }

    fn table_of(roster: &Roster, names: &[&str]) -> PriorityTable {
        PriorityTable::from_selection(roster, &SelectionMap::single_row(names.iter().copied()), false)
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn names(table: &PriorityTable) -> Vec<&str> {
        table.names().collect()
    }

    #[test]
    fn test_closest_below_exact_and_step() {
        let r = roster();
        let t = table_of(&r, &["A", "B", "C", "D", "E"]);
        assert_eq!(closest_at_or_below(0, &t, &r), set(&["A"]));
        assert_eq!(closest_at_or_below(2, &t, &r), set(&["C", "D", "E"]));
        assert_eq!(closest_at_or_below(255, &t, &r), set(&["B"]));
    }

    #[test]
    fn test_closest_below_exhausted() {
        let r = roster();
        let t = table_of(&r, &["B"]);
        assert!(closest_at_or_below(3, &t, &r).is_empty());
    }

    #[test]
    fn test_closest_above() {
        let r = roster();
        let t = table_of(&r, &["A", "B", "C", "D", "E"]);
        assert_eq!(closest_at_or_above(3, &t, &r), set(&["B"]));
        assert_eq!(closest_at_or_above(0, &t, &r), set(&["A"]));
        assert!(closest_at_or_above(5, &t, &r).is_empty());
        assert!(closest_at_or_above(Score::MAX, &t, &r).is_empty());
    }

    #[test]
    fn test_preferred_score_filter() {
        let r = roster();
        let all = ["A", "B", "C", "D", "E"];
        for (preferred, expected) in [
            (0, vec!["A"]),
            (4, vec!["B"]),
            (2, vec!["C", "D", "E"]),
            (200, vec!["B"]),
        ] {
            let config = DecisionConfig::default().with_preferred_score(preferred);
            let sel = SelectionMap::single_row(all);
            let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
            let mut t = table_of(&r, &all);
            PreferredScore.apply(&mut t, &ctx).unwrap();
            assert_eq!(names(&t), expected, "preferred = {preferred}");
        }
    }

    #[test]
    fn test_preferred_score_falls_back_upward() {
        let r = roster();
        let config = DecisionConfig::default().with_preferred_score(0);
        let sel = SelectionMap::single_row(["B", "C"]);
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["B", "C"]);
        PreferredScore.apply(&mut t, &ctx).unwrap();
        assert_eq!(names(&t), vec!["C"]);
    }

    #[test]
    fn test_group_match() {
        let r = roster();
        let config = DecisionConfig::default()
            .with_target_group("21INB-1")
            .with_group_weight(5);
        let sel = SelectionMap::single_row(["A", "C", "D"]);
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["A", "C", "D"]);
        GroupMatch.apply(&mut t, &ctx).unwrap();
        assert_eq!(t.priority("A"), Some(5));
        assert_eq!(t.priority("C"), Some(0));
        assert_eq!(t.priority("D"), Some(0));
    }

    #[test]
    fn test_group_rules_skipped_without_target() {
        let r = roster();
        let config = DecisionConfig::default();
        let sel = SelectionMap::single_row(["A", "C"]);
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["A", "C"]);
        GroupMatch.apply(&mut t, &ctx).unwrap();
        RepeatIndicator.apply(&mut t, &ctx).unwrap();
        assert_eq!(t.max_priority(), 0);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_repeat_indicator() {
        let r = roster();
        let config = DecisionConfig::default()
            .with_target_group("21INB-1")
            .with_repeat_weight(3);
        let all = ["A", "B", "C", "D", "E"];
        let sel = SelectionMap::single_row(all);
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &all);
        RepeatIndicator.apply(&mut t, &ctx).unwrap();
        // '1' vs '0' at position 1
        assert_eq!(t.priority("A"), Some(0));
        assert_eq!(t.priority("D"), Some(0));
        assert_eq!(t.priority("C"), Some(3));
        assert_eq!(t.priority("E"), Some(3));
    }

    #[test]
    fn test_repeat_indicator_short_tag() {
        let r = Roster::new(
            "unused.csv",
            vec![Candidate::new("A", "2", 0), Candidate::new("B", "21", 0)],
        );
        let sel = SelectionMap::single_row(["A", "B"]);

        let config = DecisionConfig::default().with_target_group("21");
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["A", "B"]);
        let err = RepeatIndicator.apply(&mut t, &ctx).unwrap_err();
        assert!(matches!(err, Error::MalformedGroupTag { ref tag } if tag == "2"));

        let config = DecisionConfig::default().with_target_group("X");
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let err = RepeatIndicator.apply(&mut t, &ctx).unwrap_err();
        assert!(matches!(err, Error::MalformedGroupTag { ref tag } if tag == "X"));
    }

    #[test]
    fn test_max_priority() {
        let r = roster();
        let config = DecisionConfig::default();
        let sel = SelectionMap::new();
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t: PriorityTable = [("A", 2), ("B", 3), ("C", 3), ("D", 0)]
            .into_iter()
            .map(|(n, p)| (n.to_string(), p))
            .collect();
        MaxPriority.apply(&mut t, &ctx).unwrap();
        assert_eq!(names(&t), vec!["B", "C"]);
        assert!(t.iter().all(|(_, p)| p == 3));
    }

    #[test]
    fn test_frontmost_row() {
        let r = Roster::new(
            "unused.csv",
            vec![
                Candidate::new("X", "g1", 0),
                Candidate::new("Y", "g1", 0),
                Candidate::new("Z", "g1", 0),
            ],
        );
        let mut sel = SelectionMap::new();
        sel.insert(0, "X");
        sel.insert(0, "Y");
        sel.insert(1, "Z");
        let config = DecisionConfig::default();
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["Y", "Z"]);
        FrontmostRow.apply(&mut t, &ctx).unwrap();
        assert_eq!(names(&t), vec!["Y"]);
    }

    #[test]
    fn test_frontmost_row_skips_empty_front_rows() {
        let r = roster();
        let mut sel = SelectionMap::new();
        sel.insert(0, "A");
        sel.insert(2, "C");
        sel.insert(2, "D");
        sel.insert(5, "E");
        let config = DecisionConfig::default();
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["C", "D", "E"]);
        FrontmostRow.apply(&mut t, &ctx).unwrap();
        assert_eq!(names(&t), vec!["C", "D"]);
    }

    #[test]
    fn test_frontmost_row_single_row_is_noop() {
        let r = roster();
        let sel = SelectionMap::single_row(["A", "B", "C"]);
        let config = DecisionConfig::default();
        let ctx = RuleContext { roster: &r, config: &config, selection: &sel };
        let mut t = table_of(&r, &["A", "B", "C"]);
        let before = t.clone();
        FrontmostRow.apply(&mut t, &ctx).unwrap();
        assert_eq!(t, before);
    }
}

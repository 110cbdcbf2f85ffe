//! Line-oriented roster file: `name,group,score` per line.

use super::types::{Candidate, Score};
use crate::error::{Error, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of fields per roster record.
const FIELD_COUNT: usize = 3;

/// Direction of a one-point score change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Increment,
    Decrement,
}

/// Keyed store of [`Candidate`] records backed by a file.
///
/// Records keep their load order, which is also the order they are
/// written back in by [`persist`](Self::persist).
#[derive(Debug, Clone)]
pub struct Roster {
    path: PathBuf,
    candidates: Vec<Candidate>,
}

impl Roster {
    /// Builds an in-memory roster that persists to `path`.
    pub fn new(path: impl Into<PathBuf>, candidates: Vec<Candidate>) -> Self {
        Self {
            path: path.into(),
            candidates,
        }
    }

    /// Reads and parses the roster at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::RosterIo {
            path: path.to_path_buf(),
            source,
        })?;
        let candidates = parse_records(&text)?;
        debug!(path = %path.display(), count = candidates.len(), "roster loaded");
        Ok(Self::new(path, candidates))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Looks up a candidate by exact name. The first record wins.
    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name() == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Candidate> {
        self.candidates.iter_mut().find(|c| c.name() == name)
    }

    /// Changes the named candidate's score by one point and returns the
    /// new score. Saturation at either end is not an error.
    pub fn adjust(&mut self, name: &str, adjustment: Adjustment) -> Result<Score> {
        let candidate = self.get_mut(name).ok_or_else(|| Error::UnknownCandidate {
            name: name.to_string(),
        })?;
        match adjustment {
            Adjustment::Increment => candidate.increment(),
            Adjustment::Decrement => candidate.decrement(),
        };
        Ok(candidate.score())
    }

    /// Serializes every record in load order.
    pub fn to_records(&self) -> String {
        let mut out = String::new();
        for c in &self.candidates {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{},{},{}", c.name(), c.group(), c.score());
        }
        out
    }

    /// Replaces the file contents with the current records.
    pub fn persist(&self) -> Result<()> {
        fs::write(&self.path, self.to_records()).map_err(|source| Error::Persistence {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = self.candidates.len(), "roster persisted");
        Ok(())
    }
}

/// Parses roster text. Blank lines are skipped; every other line must be a
/// well-formed record.
pub fn parse_records(text: &str) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        candidates.push(parse_record(line, idx + 1)?);
    }
    Ok(candidates)
}

fn parse_record(line: &str, line_no: usize) -> Result<Candidate> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(Error::MalformedRecord {
            line: line_no,
            reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        });
    }
    let score: Score = fields[2].parse().map_err(|_| Error::MalformedRecord {
        line: line_no,
        reason: format!("invalid points value \"{}\"", fields[2]),
    })?;
    Ok(Candidate::new(fields[0], fields[1], score))
}

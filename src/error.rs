//! Error types for roll-call.
//!
//! Every fallible operation in the crate returns [`Result`], so callers
//! can match on the specific condition that stopped a run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a roster, parsing a selection, or deciding.
#[derive(Debug, Error)]
pub enum Error {
    /// A roster line does not hold `name,group,score`, or the score is not
    /// a valid non-negative integer.
    #[error("malformed roster record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The roster file could not be read.
    #[error("failed to read roster {}: {source}", path.display())]
    RosterIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A name has no matching roster entry.
    #[error("no existing student with name \"{name}\"")]
    UnknownCandidate { name: String },

    /// No candidate from the selection exists in the roster.
    #[error("no valid selection: none of the selected students exist in the roster")]
    EmptySelection,

    /// A group tag is too short for the repeat-indicator comparison.
    #[error("group tag \"{tag}\" is shorter than 2 characters")]
    MalformedGroupTag { tag: String },

    /// The roster could not be written back.
    #[error("failed to persist roster {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selection expression could not be parsed.
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: String },

    /// The decision configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Fair picker for calling on a student.
//!
//! Given the students selected for a question, roll-call chooses exactly
//! one by applying a fixed chain of rules:
//!
//! - **Roster**: the persistent record of each student's points and
//!   seminar group.
//! - **Selection**: which students may be called on, and optionally in
//!   which seating row they sit.
//! - **Decision**: the rule chain that narrows the selection by points,
//!   group, cohort and seating row, with a uniform random tie-break.
//!
//! # Architecture
//!
//! The library holds every rule and data type; the `roll-call` binary
//! only parses arguments, loads the roster and prints the result.

pub mod decision;
pub mod error;
pub mod roster;
pub mod selection;

pub use error::{Error, Result};

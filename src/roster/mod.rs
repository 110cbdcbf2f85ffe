//! Student roster.
//!
//! The roster is the persistent record of every student, their seminar
//! group and their current points. It is stored as plain text with one
//! `name,group,score` record per line and is always rewritten in full.

mod store;
mod types;

pub use store::{parse_records, Adjustment, Roster};
pub use types::{Candidate, Score};

//! Selected students and where they sit.
//!
//! A selection expression names the students that may be called on,
//! optionally tagging each with a seating row. Parsing turns it into a
//! [`SelectionMap`], the positional input of the decision engine.

mod map;
mod parser;

pub use map::{Row, SelectionMap};
pub use parser::{parse_selection, usage_hint, ROW_DELIMITER, TOKEN_DELIMITER};

//! Selection expression parsing.
//!
//! Grammar: `token ("," token)*`, where a token is `name` or, in
//! row-aware mode, `name:row`.

use super::map::{Row, SelectionMap};
use crate::error::{Error, Result};

/// Separator between a name and its row in row-aware mode.
pub const ROW_DELIMITER: char = ':';

/// Separator between tokens.
pub const TOKEN_DELIMITER: char = ',';

/// Parses a selection expression.
///
/// Without `row_aware`, every token is taken verbatim as a name in row 0.
/// With it, each token must carry a non-negative row index.
///
/// # Examples
///
/// ```
/// use roll_call::selection::parse_selection;
///
/// let map = parse_selection("Ada:0, Bob:1, Cy:0", true).unwrap();
/// assert_eq!(map.row_count(), 2);
/// assert!(map.row(0).unwrap().contains("Cy"));
///
/// let flat = parse_selection("Ada,Bob", false).unwrap();
/// assert_eq!(flat.row_count(), 1);
/// ```
pub fn parse_selection(expr: &str, row_aware: bool) -> Result<SelectionMap> {
    let mut map = SelectionMap::new();
    for token in expr.split(TOKEN_DELIMITER).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        if row_aware {
            let (name, row) = parse_seated(token)?;
            map.insert(row, name);
        } else {
            map.insert(0, token);
        }
    }
    if map.is_empty() {
        return Err(Error::InvalidSelection {
            reason: "selection contains no student names".into(),
        });
    }
    Ok(map)
}

fn parse_seated(token: &str) -> Result<(&str, Row)> {
    let (name, row) = token
        .rsplit_once(ROW_DELIMITER)
        .ok_or_else(|| Error::InvalidSelection {
            reason: format!("\"{token}\" has no seating row (expected <name>{ROW_DELIMITER}<row>)"),
        })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidSelection {
            reason: format!("\"{token}\" has an empty name"),
        });
    }
    let row = row.trim().parse::<Row>().map_err(|_| Error::InvalidSelection {
        reason: format!("\"{token}\" has an invalid seating row"),
    })?;
    Ok((name, row))
}

/// Human-readable description of the accepted format.
pub fn usage_hint(row_aware: bool) -> String {
    let seat = if row_aware { ":<seatingRow>" } else { "" };
    format!(
        "It has to be\n 1 student:\t<studentName>{seat}\n>1 students:\t<student1Name>{seat},<student2Name>{seat},..."
    )
}

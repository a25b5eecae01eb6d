//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and 1-based column/row coordinates, plus range
//! expansion.
//!
//! Column letters are bijective base-26: there is no digit for zero, so
//! `A` = 1, `Z` = 26, `AA` = 27.
//!
//! # Examples
//!
//! ```
//! use sheetcalc_engine::engine::{CellRef, column_to_number, number_to_column};
//!
//! let cell = CellRef::parse("B3").unwrap();
//! assert_eq!(cell.col, 2);
//! assert_eq!(cell.row, 3);
//! assert_eq!(cell.to_string(), "B3");
//!
//! assert_eq!(column_to_number("AA"), Some(27));
//! assert_eq!(number_to_column(702), "ZZ");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by column and row (both 1-based).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub col: usize,
    pub row: usize,
}

/// Matches a whole cell id: uppercase column letters followed by row digits.
pub(crate) fn cell_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$").expect("cell id regex must compile")
    })
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { col, row }
    }

    /// Parse a cell id such as "A1" or "AB12".
    /// Returns None for lowercase letters, row 0, or columns that overflow.
    pub fn parse(id: &str) -> Option<CellRef> {
        let caps = cell_id_re().captures(id)?;
        let col = column_to_number(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok().filter(|row| *row > 0)?;
        Some(CellRef::new(col, row))
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", number_to_column(self.col), self.row)
    }
}

/// Convert column letters to a 1-based column number (A -> 1, Z -> 26, AA -> 27).
pub fn column_to_number(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut acc = 0usize;
    for c in letters.bytes() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = (c - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc)
}

/// Convert a 1-based column number to letters (1 -> A, 26 -> Z, 27 -> AA).
/// Zero has no column and yields an empty string.
pub fn number_to_column(n: usize) -> String {
    let mut letters = Vec::new();
    let mut n = n;
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Number of cells in the rectangle `start..=end`.
/// Reversed bounds give 0; None on overflow.
pub fn range_len(start: &CellRef, end: &CellRef) -> Option<usize> {
    if start.col > end.col || start.row > end.row {
        return Some(0);
    }
    let cols = end.col - start.col + 1;
    let rows = end.row - start.row + 1;
    cols.checked_mul(rows)
}

/// Iterate the cells of `start..=end`, columns outer and rows inner
/// (A1, A2, B1, B2). Reversed bounds are not normalized and yield nothing.
pub fn range_cells(start: CellRef, end: CellRef) -> impl Iterator<Item = CellRef> {
    (start.col..=end.col)
        .flat_map(move |col| (start.row..=end.row).map(move |row| CellRef::new(col, row)))
}

/// Expand two cell ids into every id of the rectangle between them.
/// Returns an empty Vec when either id is malformed or the bounds are reversed.
pub fn expand_range(start_id: &str, end_id: &str) -> Vec<String> {
    let (Some(start), Some(end)) = (CellRef::parse(start_id), CellRef::parse(end_id)) else {
        return Vec::new();
    };
    range_cells(start, end).map(|cell| cell.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_number_boundaries() {
        assert_eq!(column_to_number("A"), Some(1));
        assert_eq!(column_to_number("Z"), Some(26));
        assert_eq!(column_to_number("AA"), Some(27));
        assert_eq!(column_to_number("AZ"), Some(52));
        assert_eq!(column_to_number("BA"), Some(53));
        assert_eq!(column_to_number("ZZ"), Some(702));
        assert_eq!(column_to_number("AAA"), Some(703));
    }

    #[test]
    fn test_column_to_number_rejects_bad_input() {
        assert_eq!(column_to_number(""), None);
        assert_eq!(column_to_number("a"), None);
        assert_eq!(column_to_number("A1"), None);
        assert_eq!(column_to_number(&"Z".repeat(40)), None);
    }

    #[test]
    fn test_number_to_column_boundaries() {
        assert_eq!(number_to_column(0), "");
        assert_eq!(number_to_column(1), "A");
        assert_eq!(number_to_column(26), "Z");
        assert_eq!(number_to_column(27), "AA");
        assert_eq!(number_to_column(702), "ZZ");
        assert_eq!(number_to_column(703), "AAA");
    }

    #[test]
    fn test_number_to_column_handles_max_usize() {
        let letters = number_to_column(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(column_to_number(&letters), Some(usize::MAX));
    }

    #[test]
    fn test_parse_rejects_row_zero_and_lowercase() {
        assert!(CellRef::parse("A0").is_none());
        assert!(CellRef::parse("a1").is_none());
        assert!(CellRef::parse("1A").is_none());
        assert!(CellRef::parse("A 1").is_none());
        assert_eq!(CellRef::parse("A01"), Some(CellRef::new(1, 1)));
    }

    #[test]
    fn test_expand_range_is_column_major() {
        assert_eq!(expand_range("A1", "B2"), vec!["A1", "A2", "B1", "B2"]);
        assert_eq!(expand_range("C3", "C3"), vec!["C3"]);
        assert_eq!(expand_range("Y1", "AA1"), vec!["Y1", "Z1", "AA1"]);
    }

    #[test]
    fn test_expand_range_reversed_or_malformed_is_empty() {
        assert!(expand_range("B2", "A1").is_empty());
        assert!(expand_range("A3", "A1").is_empty());
        assert!(expand_range("A1", "oops").is_empty());
        assert_eq!(range_len(&CellRef::new(2, 1), &CellRef::new(1, 1)), Some(0));
    }

    proptest! {
        #[test]
        fn prop_letters_round_trip(letters in "[A-Z]{1,6}") {
            let n = column_to_number(&letters).unwrap();
            prop_assert_eq!(number_to_column(n), letters);
        }

        #[test]
        fn prop_numbers_round_trip(n in 1usize..10_000_000) {
            prop_assert_eq!(column_to_number(&number_to_column(n)), Some(n));
        }
    }
}

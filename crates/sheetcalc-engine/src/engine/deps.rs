//! Dependency extraction from formula strings.
//!
//! Parses formula text to find all cell references (e.g., `A1`, `B2:C5`)
//! that the formula depends on. This is used by cycle detection.
//!
//! Handles:
//! - Simple cell references: `A1`, `B2`
//! - Range references anywhere in the formula: `SUM(A1:B5)`
//! - Ignores references inside string literals

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::Limits;
use super::cell_ref::{CellRef, range_cells, range_len};

/// Extract the cells a formula refers to, ranges expanded, deduplicated in
/// first-seen order.
pub fn referenced_cells(formula: &str) -> Vec<String> {
    referenced_cells_with_limits(formula, &Limits::default())
}

/// Like [`referenced_cells`], skipping ranges larger than `limits.max_range_cells`.
pub fn referenced_cells_with_limits(formula: &str, limits: &Limits) -> Vec<String> {
    let mut deps = Vec::new();
    let mut seen = HashSet::new();

    // Ignore references inside string literals.
    let formula = strip_string_literals(formula);

    for caps in range_ref_re().captures_iter(&formula) {
        let range = &caps[0];
        let Some((start, end)) = parse_range(range) else {
            continue;
        };
        let cell_count = range_len(&start, &end).unwrap_or(usize::MAX);
        if cell_count > limits.max_range_cells {
            log::warn!(
                "skipping range {} ({} cells, limit {})",
                range,
                cell_count,
                limits.max_range_cells
            );
            continue;
        }
        for cell in range_cells(start, end) {
            push_unique(&mut deps, &mut seen, cell.to_string());
        }
    }

    // Remove ranges so their endpoints are not counted twice.
    let without_ranges = range_ref_re().replace_all(&formula, " ");
    for m in cell_ref_re().find_iter(&without_ranges) {
        push_unique(&mut deps, &mut seen, m.as_str().to_string());
    }

    deps
}

fn push_unique(deps: &mut Vec<String>, seen: &mut HashSet<String>, id: String) {
    if seen.insert(id.clone()) {
        deps.push(id);
    }
}

/// Matches a bare cell reference such as `A1` or `AB12`.
pub(crate) fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"\b[A-Z]+[0-9]+\b").expect("dependency cell reference regex must compile")
    })
}

/// Matches a range reference such as `A1:B5`.
pub(crate) fn range_ref_re() -> &'static Regex {
    static RANGE_RE: OnceLock<Regex> = OnceLock::new();
    RANGE_RE.get_or_init(|| {
        Regex::new(r"\b([A-Z]+[0-9]+):([A-Z]+[0-9]+)\b")
            .expect("dependency range reference regex must compile")
    })
}

fn strip_string_literals(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len());
    let mut in_string = false;

    for ch in formula.chars() {
        if ch == '"' {
            in_string = !in_string;
            out.push('"');
        } else if in_string {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }

    out
}

/// Parse a cell range like "A1:B5" into its two corners.
pub fn parse_range(range: &str) -> Option<(CellRef, CellRef)> {
    let (start, end) = range.split_once(':')?;
    Some((CellRef::parse(start)?, CellRef::parse(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_cells_mixes_ranges_and_refs() {
        let deps = referenced_cells("=SUM(A1:A3)+B1*A2");
        assert_eq!(deps, vec!["A1", "A2", "A3", "B1"]);
    }

    #[test]
    fn test_referenced_cells_deduplicates() {
        assert_eq!(referenced_cells("=A1+A1+A1"), vec!["A1"]);
    }

    #[test]
    fn test_referenced_cells_ignores_string_literals() {
        assert_eq!(referenced_cells("=CONCATENATE(\"A1\",B2)"), vec!["B2"]);
    }

    #[test]
    fn test_referenced_cells_none() {
        assert!(referenced_cells("=1+2").is_empty());
        assert!(referenced_cells("").is_empty());
    }

    #[test]
    fn test_referenced_cells_skips_over_limit_ranges() {
        let limits = Limits { max_range_cells: 10 };
        let deps = referenced_cells_with_limits("=SUM(A1:A11)+B2", &limits);
        assert_eq!(deps, vec!["B2"]);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_range("A1:B5"),
            Some((CellRef::new(1, 1), CellRef::new(2, 5)))
        );
        assert_eq!(parse_range("A1"), None);
        assert_eq!(parse_range("invalid"), None);
    }
}

//! Circular dependency detection for formula cells.
//!
//! When a formula is entered, we must verify it doesn't create a cycle
//! (e.g., A1 references B1, B1 references C1, C1 references A1).
//! This module walks the "formula references cell" relation depth-first
//! before the edit is committed.
//!
//! Only loops that come back to the cell being edited are reported. A cycle
//! among other cells that the new formula merely reaches is not.

use std::collections::HashSet;

use super::context::{FormulaSource, is_formula};
use super::deps::referenced_cells_with_limits;
use super::Limits;

/// Check whether placing `formula` into `current_cell` would close a loop
/// back to `current_cell`.
///
/// `source` returns each cell's raw content. Cells whose content is not a
/// formula are dead ends. A `formula` that is not a formula never cycles.
pub fn detect_circular_reference<S>(formula: &str, current_cell: &str, source: &S) -> bool
where
    S: FormulaSource + ?Sized,
{
    detect_circular_reference_with_limits(formula, current_cell, source, &Limits::default())
}

/// Like [`detect_circular_reference`], skipping ranges larger than
/// `limits.max_range_cells`.
pub fn detect_circular_reference_with_limits<S>(
    formula: &str,
    current_cell: &str,
    source: &S,
    limits: &Limits,
) -> bool
where
    S: FormulaSource + ?Sized,
{
    if !is_formula(formula) {
        return false;
    }

    let mut visited = HashSet::new();
    // Explicit stack so long reference chains cannot exhaust the call stack.
    let mut pending = vec![formula.to_string()];

    while let Some(formula) = pending.pop() {
        for cell in referenced_cells_with_limits(&formula, limits) {
            if cell == current_cell {
                log::trace!("{} reaches back to {}", formula, current_cell);
                return true;
            }
            if !visited.insert(cell.clone()) {
                continue;
            }

            let contents = source.cell_formula(&cell);
            if is_formula(&contents) {
                pending.push(contents);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sheet(cells: &[(&str, &str)]) -> HashMap<String, String> {
        cells
            .iter()
            .map(|(id, content)| (id.to_string(), content.to_string()))
            .collect()
    }

    fn lookup(cells: &HashMap<String, String>) -> impl Fn(&str) -> String + '_ {
        move |id: &str| cells.get(id).cloned().unwrap_or_default()
    }

    #[test]
    fn test_detect_cycle_direct() {
        let cells = sheet(&[("A2", "=A1")]);
        assert!(detect_circular_reference("=A2", "A1", &lookup(&cells)));
    }

    #[test]
    fn test_detect_cycle_literal_dead_end() {
        let cells = sheet(&[("A2", "5")]);
        assert!(!detect_circular_reference("=A2", "A1", &lookup(&cells)));
    }

    #[test]
    fn test_detect_cycle_self_reference() {
        let cells = sheet(&[]);
        assert!(detect_circular_reference("=A1+1", "A1", &lookup(&cells)));
        assert!(detect_circular_reference("=SUM(A1:A3)", "A2", &lookup(&cells)));
    }

    #[test]
    fn test_detect_cycle_indirect_through_range() {
        let cells = sheet(&[("B1", "=C1*2"), ("C1", "=SUM(A1:A5)")]);
        assert!(detect_circular_reference("=B1", "A3", &lookup(&cells)));
        assert!(!detect_circular_reference("=B1", "D1", &lookup(&cells)));
    }

    #[test]
    fn test_detect_cycle_ignores_loops_not_through_origin() {
        // B1 and C1 form their own loop; A1 only reaches it.
        let cells = sheet(&[("B1", "=C1"), ("C1", "=B1")]);
        assert!(!detect_circular_reference("=B1", "A1", &lookup(&cells)));
    }

    #[test]
    fn test_detect_cycle_literal_start() {
        let cells = sheet(&[("A2", "=A1")]);
        assert!(!detect_circular_reference("A2", "A1", &lookup(&cells)));
    }

    #[test]
    fn test_detect_cycle_long_chain() {
        let mut cells = HashMap::new();
        for row in 2..=5000 {
            cells.insert(format!("A{}", row), format!("=A{}", row + 1));
        }
        cells.insert("A5001".to_string(), "=A1".to_string());
        assert!(detect_circular_reference("=A2", "A1", &lookup(&cells)));
    }
}

use dashmap::DashMap;
use sheetcalc_engine::engine::{CellRef, FormulaSource, Limits};

/// UI-agnostic sheet: a sparse grid of raw cell contents.
///
/// Contents are stored exactly as entered (`"12"`, `"hello"`, `"=A1*2"`).
/// Nothing is cached; values are computed on every read.
pub struct Sheet {
    /// Raw cell contents keyed by position. Empty cells are absent.
    pub(super) grid: DashMap<CellRef, String>,
    /// Bounds applied to evaluation and cycle checks.
    pub limits: Limits,
}

impl Sheet {
    /// Create an empty sheet with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Sheet {
            grid: DashMap::new(),
            limits,
        }
    }

    /// Raw content of a cell, if it has any.
    pub fn raw(&self, id: &str) -> Option<String> {
        let cell_ref = CellRef::parse(id)?;
        self.grid.get(&cell_ref).map(|entry| entry.value().clone())
    }

    /// Positions of all non-empty cells, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.grid.iter().map(|entry| *entry.key())
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaSource for Sheet {
    fn cell_formula(&self, id: &str) -> String {
        self.raw(id).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_lists_occupied_positions() {
        let mut sheet = Sheet::new();
        sheet.set_cell("B2", "x").unwrap();
        sheet.set_cell("A1", "=B2").unwrap();
        sheet.set_cell("C3", "").unwrap();

        let mut cells: Vec<String> = sheet.cells().map(|cell| cell.to_string()).collect();
        cells.sort();
        assert_eq!(cells, vec!["A1", "B2"]);
    }
}

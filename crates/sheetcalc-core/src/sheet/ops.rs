use super::Sheet;
use crate::error::{Result, SheetError};
use sheetcalc_engine::engine::{CellRef, detect_circular_reference_with_limits, is_formula};

impl Sheet {
    /// Set cell contents from input string.
    ///
    /// Empty input clears the cell. A formula that would reference its own
    /// cell, directly or through other formulas, is rejected and the sheet is
    /// left unchanged.
    pub fn set_cell(&mut self, id: &str, input: &str) -> Result<()> {
        let cell_ref = CellRef::parse(id).ok_or_else(|| SheetError::InvalidCell(id.to_string()))?;

        if input.is_empty() {
            self.grid.remove(&cell_ref);
            return Ok(());
        }

        // Check for circular dependencies if it's a formula
        if is_formula(input) {
            let cell = cell_ref.to_string();
            if detect_circular_reference_with_limits(input, &cell, &*self, &self.limits) {
                log::debug!("rejected {} = {:?}: circular dependency", cell, input);
                return Err(SheetError::CircularDependency { cell });
            }
        }

        self.grid.insert(cell_ref, input.to_string());
        Ok(())
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, id: &str) {
        if let Some(cell_ref) = CellRef::parse(id) {
            self.grid.remove(&cell_ref);
        }
    }
}

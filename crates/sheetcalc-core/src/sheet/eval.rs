use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::Sheet;
use sheetcalc_engine::engine::{
    ErrorValue, FormulaContext, Scalar, Value, evaluate_with_limits, format_value, is_formula,
    referenced_cells_with_limits,
};

/// Deepest nesting of formula cells evaluated inside one another.
pub const MAX_EVAL_DEPTH: usize = 100;

/// Reads cells for the evaluator, evaluating formula cells on demand.
///
/// Lives for one top-level read. Each formula cell is evaluated at most once
/// and its value reused for the rest of that read. Dependencies found by the
/// reference scan are evaluated first, deepest first, so long chains never
/// nest. References the scan cannot see (e.g. a quoted comma split into a
/// reference) still nest, bounded by [`MAX_EVAL_DEPTH`], and a cell that
/// re-enters itself yields `#ERROR!`.
struct SheetContext<'a> {
    sheet: &'a Sheet,
    values: RefCell<HashMap<String, Value>>,
    in_progress: RefCell<HashSet<String>>,
    depth: Cell<usize>,
}

impl<'a> SheetContext<'a> {
    fn new(sheet: &'a Sheet) -> Self {
        SheetContext {
            sheet,
            values: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(HashSet::new()),
            depth: Cell::new(0),
        }
    }

    fn formula_of(&self, id: &str) -> Option<String> {
        self.sheet.raw(id).filter(|raw| is_formula(raw))
    }

    fn value_of(&self, id: &str) -> Value {
        if let Some(value) = self.values.borrow().get(id) {
            return value.clone();
        }
        let Some(raw) = self.sheet.raw(id) else {
            return Value::Text(String::new());
        };
        if !is_formula(&raw) {
            return Value::Text(raw);
        }

        self.evaluate_dependencies(id);
        self.compute(id, &raw)
    }

    /// Evaluate the formula cells `id` depends on, in post-order.
    fn evaluate_dependencies(&self, id: &str) {
        let mut seen = HashSet::new();
        let mut pending = vec![(id.to_string(), false)];

        while let Some((cell, expanded)) = pending.pop() {
            if expanded {
                if cell != id
                    && let Some(raw) = self.formula_of(&cell)
                {
                    self.compute(&cell, &raw);
                }
                continue;
            }
            if !seen.insert(cell.clone()) || self.values.borrow().contains_key(&cell) {
                continue;
            }
            let Some(raw) = self.formula_of(&cell) else {
                continue;
            };

            pending.push((cell, true));
            for dep in referenced_cells_with_limits(&raw, &self.sheet.limits) {
                if !seen.contains(&dep) {
                    pending.push((dep, false));
                }
            }
        }
    }

    fn compute(&self, id: &str, raw: &str) -> Value {
        if let Some(value) = self.values.borrow().get(id) {
            return value.clone();
        }
        if self.depth.get() >= MAX_EVAL_DEPTH {
            log::warn!("cell {} nested deeper than {} formulas", id, MAX_EVAL_DEPTH);
            return Value::Error(ErrorValue::Error);
        }
        if !self.in_progress.borrow_mut().insert(id.to_string()) {
            log::warn!("cell {} refers back to itself during evaluation", id);
            return Value::Error(ErrorValue::Error);
        }

        self.depth.set(self.depth.get() + 1);
        let value = evaluate_with_limits(raw, self, &self.sheet.limits);
        self.depth.set(self.depth.get() - 1);
        self.in_progress.borrow_mut().remove(id);

        self.values.borrow_mut().insert(id.to_string(), value.clone());
        value
    }
}

impl FormulaContext for SheetContext<'_> {
    fn cell_value(&self, id: &str) -> Scalar {
        self.value_of(id).to_scalar()
    }
}

impl FormulaContext for Sheet {
    fn cell_value(&self, id: &str) -> Scalar {
        SheetContext::new(self).cell_value(id)
    }
}

impl Sheet {
    /// Computed value of a cell. Empty cells are empty text.
    pub fn value(&self, id: &str) -> Value {
        SheetContext::new(self).value_of(id)
    }

    /// Computed value of a cell formatted for display.
    pub fn display(&self, id: &str) -> String {
        format_value(&self.value(id))
    }

    /// Evaluate a formula that is not stored in any cell against this sheet.
    pub fn evaluate(&self, formula: &str) -> Value {
        evaluate_with_limits(formula, &SheetContext::new(self), &self.limits)
    }
}

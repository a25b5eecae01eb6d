use serde::{Deserialize, Serialize};

/// Default cap on the number of cells a single range may expand to.
pub const DEFAULT_MAX_RANGE_CELLS: usize = 1_000_000;

/// Resource bounds applied while evaluating formulas and walking references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Ranges larger than this are rejected by the evaluator
    /// and skipped by cycle detection.
    pub max_range_cells: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_range_cells: DEFAULT_MAX_RANGE_CELLS,
        }
    }
}

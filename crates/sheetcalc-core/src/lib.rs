//! sheetcalc-core - UI-agnostic sheet model.

pub mod error;
pub mod sheet;

pub use error::{Result, SheetError};
pub use sheet::Sheet;

pub use sheetcalc_engine::engine::{CellRef, Limits, Value};

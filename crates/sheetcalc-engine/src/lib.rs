//! sheetcalc_engine - Spreadsheet formula engine.
//!
//! Stateless: every call reads cells through the caller's
//! [`FormulaContext`](engine::FormulaContext) or
//! [`FormulaSource`](engine::FormulaSource) and keeps nothing between calls.

pub(crate) mod builtins;
pub mod engine;
pub mod error;

pub use error::{FormulaError, FormulaResult};

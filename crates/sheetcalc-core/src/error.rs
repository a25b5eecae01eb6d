//! Error types for sheetcalc core.

use thiserror::Error;

/// Errors that can occur while editing a sheet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("Invalid cell reference: {0}")]
    InvalidCell(String),

    #[error("Circular dependency detected in {cell}")]
    CircularDependency { cell: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;

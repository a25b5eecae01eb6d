//! Error types for the sheetcalc command line

use std::path::PathBuf;

use sheetcalc_core::SheetError;
use thiserror::Error;

/// Errors that can occur in the sheetcalc command line
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

pub type Result<T> = std::result::Result<T, CliError>;

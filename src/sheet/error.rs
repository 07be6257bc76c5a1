//! Sheet loading errors

use thiserror::Error;

/// Structural problems with an uploaded order file.
///
/// Any of these aborts the report; individual bad cells never do.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type '{0}' (expected .xlsx, .xlsm, .xls, .xlsb, .ods or .csv)")]
    UnsupportedFormat(String),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Sheet '{name}' not found (available: {available})")]
    MissingSheet { name: String, available: String },

    #[error("Sheet '{0}' has no data")]
    EmptySheet(String),

    #[error("Sheet '{sheet}' only has {found} columns, but column {needed} is required")]
    MissingColumns {
        sheet: String,
        found: usize,
        needed: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SheetResult<T> = Result<T, SheetError>;

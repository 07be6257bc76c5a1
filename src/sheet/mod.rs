//! Sheet input module
//!
//! Reads uploaded order files into raw rows.

pub mod error;
pub mod reader;

pub use error::{SheetError, SheetResult};
pub use reader::{load_csv, load_rows, load_workbook, LoadedSheet};

//! Order sheet readers
//!
//! Pull the five order columns out of an Excel workbook or a CSV export.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use serde::Serialize;

use super::error::{SheetError, SheetResult};
use crate::config::{column_letters, ColumnMap, ReportConfig};
use crate::models::RawRow;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Rows read from one file
#[derive(Debug, Clone, Serialize)]
pub struct LoadedSheet {
    pub source: String,
    pub rows: Vec<RawRow>,
    /// Non-blank rows dropped because the item name was empty
    pub skipped_rows: usize,
}

enum RowOutcome {
    Row(RawRow),
    Skipped,
    Blank,
}

/// Load order rows from a workbook or CSV file, picked by extension
pub fn load_rows(path: &Path, config: &ReportConfig) -> SheetResult<LoadedSheet> {
    if !path.exists() {
        return Err(SheetError::NotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let loaded = if extension == "csv" {
        load_csv(path, &config.columns)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_workbook(path, &config.sheet_name, &config.columns)?
    } else {
        return Err(SheetError::UnsupportedFormat(extension));
    };

    tracing::info!(
        "Loaded {} order rows from {}",
        loaded.rows.len(),
        loaded.source
    );
    if loaded.skipped_rows > 0 {
        tracing::warn!(
            "Skipped {} rows without an item name in {}",
            loaded.skipped_rows,
            loaded.source
        );
    }

    Ok(loaded)
}

/// Read one sheet of an Excel/ODS workbook. The first used row is the header.
pub fn load_workbook(path: &Path, sheet_name: &str, columns: &ColumnMap) -> SheetResult<LoadedSheet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|n| n == sheet_name) {
        return Err(SheetError::MissingSheet {
            name: sheet_name.to_string(),
            available: sheet_names.join(", "),
        });
    }

    let range = workbook.worksheet_range(sheet_name)?;
    let (Some((_, start_col)), Some((_, end_col))) = (range.start(), range.end()) else {
        return Err(SheetError::EmptySheet(sheet_name.to_string()));
    };

    let needed = columns.max_index();
    if (end_col as usize) < needed {
        return Err(SheetError::MissingColumns {
            sheet: sheet_name.to_string(),
            found: end_col as usize + 1,
            needed: column_letters(needed),
        });
    }

    let start_col = start_col as usize;
    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for row in range.rows().skip(1) {
        let cell = |col: usize| {
            col.checked_sub(start_col)
                .and_then(|c| row.get(c))
                .and_then(cell_text)
        };
        match row_from_cells(
            cell(columns.item_name),
            cell(columns.category),
            cell(columns.mrp),
            cell(columns.quantity),
            cell(columns.unit),
        ) {
            RowOutcome::Row(r) => rows.push(r),
            RowOutcome::Skipped => skipped_rows += 1,
            RowOutcome::Blank => {}
        }
    }

    Ok(LoadedSheet {
        source: format!("{} [{}]", path.display(), sheet_name),
        rows,
        skipped_rows,
    })
}

/// Read a CSV export of the order sheet, header row first
pub fn load_csv(path: &Path, columns: &ColumnMap) -> SheetResult<LoadedSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let header_len = reader.headers()?.len();
    let needed = columns.max_index();
    if header_len <= needed {
        return Err(SheetError::MissingColumns {
            sheet: path.display().to_string(),
            found: header_len,
            needed: column_letters(needed),
        });
    }

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for record in reader.records() {
        let record = record?;
        let cell = |col: usize| {
            record
                .get(col)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        match row_from_cells(
            cell(columns.item_name),
            cell(columns.category),
            cell(columns.mrp),
            cell(columns.quantity),
            cell(columns.unit),
        ) {
            RowOutcome::Row(r) => rows.push(r),
            RowOutcome::Skipped => skipped_rows += 1,
            RowOutcome::Blank => {}
        }
    }

    Ok(LoadedSheet {
        source: path.display().to_string(),
        rows,
        skipped_rows,
    })
}

/// Text of a workbook cell; numbers use their shortest decimal form
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(v) => Some(v.to_string()),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(v) => Some(v.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        // #N/A, #DIV/0! and friends carry no order data
        Data::Error(_) => None,
    }
}

fn row_from_cells(
    item_name: Option<String>,
    category: Option<String>,
    mrp: Option<String>,
    quantity_expr: Option<String>,
    unit: Option<String>,
) -> RowOutcome {
    // A whitespace-only name is still a name and gets its own group
    let Some(item_name) = item_name else {
        let all_empty = [&category, &mrp, &quantity_expr, &unit]
            .iter()
            .all(|c| c.as_deref().map_or(true, |v| v.trim().is_empty()));
        return if all_empty {
            RowOutcome::Blank
        } else {
            RowOutcome::Skipped
        };
    };

    RowOutcome::Row(RawRow {
        item_name,
        category,
        mrp,
        quantity_expr,
        unit,
    })
}

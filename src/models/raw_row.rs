//! Raw order row
//!
//! One spreadsheet line as read from the upload, before any normalization.

use serde::{Deserialize, Serialize};

/// A single order line exactly as it appeared in the sheet.
///
/// Cells that were empty are `None`. Numeric cells arrive as their decimal
/// text, so `mrp` and `quantity_expr` are coerced by the normalizer rather
/// than by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub item_name: String,
    pub category: Option<String>,
    pub mrp: Option<String>,
    pub quantity_expr: Option<String>,
    pub unit: Option<String>,
}

impl RawRow {
    /// Build a row from borrowed cell values
    pub fn new(
        item_name: &str,
        category: Option<&str>,
        mrp: Option<&str>,
        quantity_expr: Option<&str>,
        unit: Option<&str>,
    ) -> Self {
        Self {
            item_name: item_name.to_string(),
            category: category.map(str::to_string),
            mrp: mrp.map(str::to_string),
            quantity_expr: quantity_expr.map(str::to_string),
            unit: unit.map(str::to_string),
        }
    }
}

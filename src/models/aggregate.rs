//! Aggregated order lines and report totals

use serde::Serialize;

use super::QuantityIssue;

/// One line of the report: every raw row sharing (category, item, unit)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub category: String,
    pub item_name: String,
    pub unit: String,
    pub quantity: f64,
    pub free_quantity: f64,
    /// MRP of the first row seen for the group
    pub mrp: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub total_quantity: f64,
    pub total_free_quantity: f64,
}

impl ReportTotals {
    pub fn from_rows(rows: &[AggregateRow]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            total_quantity: acc.total_quantity + row.quantity,
            total_free_quantity: acc.total_free_quantity + row.free_quantity,
        })
    }
}

/// Everything a renderer needs for one report
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub rows: Vec<AggregateRow>,
    pub totals: ReportTotals,
    /// Data rows read from the sheet, excluding the header
    pub rows_read: usize,
    /// Rows dropped because they had no item name
    pub rows_skipped: usize,
    pub quantity_issues: Vec<QuantityIssue>,
}

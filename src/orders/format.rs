//! Display formatting for report cells
//!
//! Applied only when rendering; aggregate values stay as plain floats.

use serde::Serialize;

use crate::models::{AggregateRow, ReportTotals};

/// Whole numbers without decimals, everything else with two
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Like [`format_quantity`], but zero is left blank
pub fn format_free_quantity(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format_quantity(value)
    }
}

/// Two decimals, zero left blank
pub fn format_mrp(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{:.2}", value)
    }
}

/// One report line as text, in table column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub mrp: String,
    pub category: String,
    pub item_name: String,
    pub unit: String,
    pub quantity: String,
    pub free_quantity: String,
}

impl From<&AggregateRow> for DisplayRow {
    fn from(row: &AggregateRow) -> Self {
        Self {
            mrp: format_mrp(row.mrp),
            category: row.category.clone(),
            item_name: row.item_name.clone(),
            unit: row.unit.clone(),
            quantity: format_quantity(row.quantity),
            free_quantity: format_free_quantity(row.free_quantity),
        }
    }
}

/// Totals as text; both are always shown, zero included
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTotals {
    pub quantity: String,
    pub free_quantity: String,
}

impl From<&ReportTotals> for DisplayTotals {
    fn from(totals: &ReportTotals) -> Self {
        Self {
            quantity: format_quantity(totals.total_quantity),
            free_quantity: format_quantity(totals.total_free_quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(15.0), "15");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(2.5), "2.50");
        assert_eq!(format_quantity(0.1 + 0.2), "0.30");
    }

    #[test]
    fn test_format_free_quantity() {
        assert_eq!(format_free_quantity(0.0), "");
        assert_eq!(format_free_quantity(2.0), "2");
        assert_eq!(format_free_quantity(2.5), "2.50");
    }

    #[test]
    fn test_format_mrp() {
        assert_eq!(format_mrp(0.0), "");
        assert_eq!(format_mrp(50.0), "50.00");
        assert_eq!(format_mrp(12.346), "12.35");
    }

    #[test]
    fn test_display_row_and_totals() {
        let row = AggregateRow {
            category: "Food".to_string(),
            item_name: "Rice".to_string(),
            unit: "kg".to_string(),
            quantity: 15.0,
            free_quantity: 0.0,
            mrp: 0.0,
        };
        let display = DisplayRow::from(&row);
        assert_eq!(display.mrp, "");
        assert_eq!(display.quantity, "15");
        assert_eq!(display.free_quantity, "");

        let totals = DisplayTotals::from(&ReportTotals {
            total_quantity: 15.0,
            total_free_quantity: 0.0,
        });
        assert_eq!(totals.quantity, "15");
        assert_eq!(totals.free_quantity, "0");
    }
}

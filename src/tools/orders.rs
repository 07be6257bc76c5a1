//! Order summary tool
//!
//! Aggregates an order file without rendering it.

use std::path::Path;

use serde::Serialize;

use crate::config::ReportConfig;
use crate::models::OrderSummary;
use crate::orders::{summarize, DisplayRow, DisplayTotals};
use crate::sheet::load_rows;

#[derive(Debug, Serialize)]
pub struct SummarizeOrderResponse {
    pub success: bool,
    pub source: String,
    pub summary: OrderSummary,
    /// Report lines as they would print
    pub display_rows: Vec<DisplayRow>,
    pub display_totals: DisplayTotals,
    pub message: String,
}

/// Load and aggregate an order file
pub fn summarize_order(input_path: &str, config: &ReportConfig) -> Result<SummarizeOrderResponse, String> {
    let loaded = load_rows(Path::new(input_path), config).map_err(|e| e.to_string())?;
    let summary = summarize(&loaded.rows, loaded.skipped_rows);

    let display_rows = summary.rows.iter().map(DisplayRow::from).collect();
    let display_totals = DisplayTotals::from(&summary.totals);

    let mut message = format!(
        "{} items from {} rows (total qty {}, free {})",
        summary.rows.len(),
        summary.rows_read,
        display_totals.quantity,
        display_totals.free_quantity
    );
    if !summary.quantity_issues.is_empty() {
        message.push_str(&format!(
            "; {} unreadable quantities counted as zero",
            summary.quantity_issues.len()
        ));
    }

    Ok(SummarizeOrderResponse {
        success: true,
        source: loaded.source,
        summary,
        display_rows,
        display_totals,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_order_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("orders.csv");
        std::fs::write(
            &input,
            "A,B,C,Item,E,F,Category,MRP,I,J,Qty,Unit\n\
             1,,,Rice,,,Food,50,,,10+2,kg\n\
             2,,,Rice,,,Food,55,,,5,kg\n\
             3,,,Pen,,,B,,,,2.5,pcs\n\
             4,,,Ink,,,A,,,,x+1,\n",
        )
        .unwrap();

        let response = summarize_order(input.to_str().unwrap(), &ReportConfig::default()).unwrap();

        let names: Vec<&str> = response
            .summary
            .rows
            .iter()
            .map(|r| r.item_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ink", "Pen", "Rice"]);

        let rice = &response.summary.rows[2];
        assert_eq!(rice.mrp, 50.0);
        assert_eq!(rice.quantity, 15.0);

        assert_eq!(response.display_rows[0].unit, "-");
        assert_eq!(response.display_rows[1].quantity, "2.50");
        assert_eq!(response.display_rows[1].mrp, "");
        assert_eq!(response.display_totals.quantity, "17.50");
        assert_eq!(response.display_totals.free_quantity, "2");
        assert_eq!(response.summary.quantity_issues.len(), 1);
        assert!(response.message.contains("1 unreadable"));
    }

    #[test]
    fn test_summarize_order_missing_file() {
        let err = summarize_order("/nonexistent/orders.xlsx", &ReportConfig::default()).unwrap_err();
        assert!(err.contains("not found"));
    }
}

//! Order report status tool
//!
//! Provides runtime status information about the report service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage guide for AI assistants
pub const REPORT_INSTRUCTIONS: &str = r#"
# Ferrite Agencies Order Report Instructions

This guide explains how to turn an order spreadsheet into a PDF order report.

## Input File

Supported formats: `.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods` and `.csv`.

For workbooks, the order lines must be on the sheet named **Item Details**
(override with `FERRITE_SHEET_NAME`). The first row is a header and is skipped.

Five columns are read (override with `FERRITE_COLUMNS`, default `D,G,H,K,L`):

| Column | Meaning |
|--------|---------|
| D | Item Name |
| G | Category |
| H | MRP |
| K | Quantity |
| L | Unit |

CSV files use the same column letters (A = first field).

## Quantity Format

- `10` means 10 units, no free units
- `10+2` means 10 units plus 2 free units
- `+2` means only 2 free units
- Anything that is not a number (e.g. `ten`, `abc+2`, `-5`) counts as **zero**
  and is listed under `quantity_issues` by `summarize_order`

## How Lines Are Combined

Rows with the same **category, item name and unit** become one report line:
- Quantities and free quantities are added up
- MRP is taken from the first row of the group
- Missing category becomes `Uncategorized`, missing unit becomes `-`
- Rows without an item name are skipped

Lines are sorted by category, then item name, then unit.

## Tools

1. `summarize_order` - check the aggregation and any unreadable quantities first
2. `generate_order_report` - write the PDF (default folder: `FERRITE_OUTPUT_DIR`,
   file name `Ferrite_Order_HHMMSS.pdf`)
3. `report_status` - build info and how many reports were generated

## Report Layout

Columns: MRP | CATEGORY | ITEM NAME | UNIT | QTY | FREE QTY
- MRP of 0 and free quantity of 0 are left blank
- Whole quantities print without decimals, others with two
- The final TOTAL ITEMS row sums QTY and FREE QTY
"#;

/// Runtime status of the report service
#[derive(Debug, Clone, Serialize)]
pub struct ReportStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub output_dir: String,
    pub reports_generated: u64,
    pub last_report: Option<String>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    output_dir: PathBuf,
    reports_generated: u64,
    last_report: Option<String>,
}

impl StatusTracker {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            output_dir,
            reports_generated: 0,
            last_report: None,
        }
    }

    /// Record a successfully written report
    pub fn record_report(&mut self, file_path: &str) {
        self.reports_generated += 1;
        self.last_report = Some(file_path.to_string());
    }

    pub fn get_status(&self) -> ReportStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ReportStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            output_dir: self.output_dir.display().to_string(),
            reports_generated: self.reports_generated,
            last_report: self.last_report.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tracks_reports() {
        let mut tracker = StatusTracker::new(PathBuf::from("/tmp/reports"));
        let status = tracker.get_status();
        assert_eq!(status.reports_generated, 0);
        assert!(status.last_report.is_none());
        assert_eq!(status.process_id, std::process::id());

        tracker.record_report("/tmp/reports/Ferrite_Order_101500.pdf");
        tracker.record_report("/tmp/reports/Ferrite_Order_101600.pdf");
        let status = tracker.get_status();
        assert_eq!(status.reports_generated, 2);
        assert_eq!(
            status.last_report.as_deref(),
            Some("/tmp/reports/Ferrite_Order_101600.pdf")
        );
    }

    #[test]
    fn test_instructions_mention_tools() {
        assert!(REPORT_INSTRUCTIONS.contains("summarize_order"));
        assert!(REPORT_INSTRUCTIONS.contains("generate_order_report"));
    }
}

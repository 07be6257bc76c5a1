//! Runtime configuration
//!
//! Read from environment variables, falling back to the layout of the
//! Ferrite Agencies order workbook.

use std::path::PathBuf;

use serde::Serialize;

pub const DEFAULT_SHEET_NAME: &str = "Item Details";
pub const DEFAULT_COLUMNS: &str = "D,G,H,K,L";
pub const DEFAULT_COMPANY_NAME: &str = "Ferrite Agencies";
pub const DEFAULT_REPORT_TITLE: &str = "Order Report";

/// Zero-based positions of the five order columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub item_name: usize,
    pub category: usize,
    pub mrp: usize,
    pub quantity: usize,
    pub unit: usize,
}

impl ColumnMap {
    /// Parse a comma separated list of five column letters, e.g. `"D,G,H,K,L"`,
    /// in the order item name, category, MRP, quantity, unit.
    pub fn parse(letters: &str) -> Option<Self> {
        let cols: Vec<usize> = letters
            .split(',')
            .map(|c| column_index(c.trim()))
            .collect::<Option<Vec<_>>>()?;

        match cols.as_slice() {
            [item_name, category, mrp, quantity, unit] => Some(Self {
                item_name: *item_name,
                category: *category,
                mrp: *mrp,
                quantity: *quantity,
                unit: *unit,
            }),
            _ => None,
        }
    }

    /// Right-most column the reader has to reach
    pub fn max_index(&self) -> usize {
        [self.item_name, self.category, self.mrp, self.quantity, self.unit]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            item_name: 3,
            category: 6,
            mrp: 7,
            quantity: 10,
            unit: 11,
        }
    }
}

/// Convert spreadsheet column letters to a zero-based index ("A" -> 0, "AA" -> 26)
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
    .map(|n| n - 1)
}

/// Convert a zero-based column index back to letters (0 -> "A")
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub sheet_name: String,
    pub columns: ColumnMap,
    pub company_name: String,
    pub report_title: String,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            columns: ColumnMap::default(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            output_dir: default_output_dir(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let columns = match std::env::var("FERRITE_COLUMNS") {
            Ok(value) => ColumnMap::parse(&value).unwrap_or_else(|| {
                tracing::warn!(
                    "FERRITE_COLUMNS='{}' is not five column letters, using {}",
                    value,
                    DEFAULT_COLUMNS
                );
                defaults.columns
            }),
            Err(_) => defaults.columns,
        };

        Self {
            sheet_name: non_empty_var("FERRITE_SHEET_NAME").unwrap_or(defaults.sheet_name),
            columns,
            company_name: non_empty_var("FERRITE_COMPANY_NAME").unwrap_or(defaults.company_name),
            report_title: non_empty_var("FERRITE_REPORT_TITLE").unwrap_or(defaults.report_title),
            output_dir: non_empty_var("FERRITE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `<project root>/reports`, where the project root is found by stepping out
/// of `target/debug` or `target/release` next to the executable
pub fn default_output_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("reports");
    path
}

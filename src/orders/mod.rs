//! Order processing module
//!
//! Quantity parsing, field normalization, aggregation and display rules.

pub mod aggregator;
pub mod format;
pub mod parser;

pub use aggregator::{aggregate, collect_quantity_issues, summarize};
pub use format::{
    format_free_quantity, format_mrp, format_quantity, DisplayRow, DisplayTotals,
};
pub use parser::{
    classify_quantity, normalize_category, normalize_mrp, normalize_unit, parse_quantity,
    MISSING_CATEGORY, MISSING_UNIT,
};

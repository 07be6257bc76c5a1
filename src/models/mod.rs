//! Data models
//!
//! Rust structs for order rows as read, parsed and aggregated.

mod aggregate;
mod quantity;
mod raw_row;

pub use aggregate::{AggregateRow, OrderSummary, ReportTotals};
pub use quantity::{MalformedReason, ParsedQuantity, QuantityIssue, QuantityParse};
pub use raw_row::RawRow;

//! Quantity expression types
//!
//! A quantity cell reads like `"10"` or `"10+2"`: a base quantity optionally
//! followed by a free (promotional) quantity.

use serde::{Deserialize, Serialize};

/// Base and free quantity parsed from one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuantity {
    pub base: f64,
    pub free: f64,
}

impl ParsedQuantity {
    pub fn new(base: f64, free: f64) -> Self {
        Self { base, free }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Why a quantity expression could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// A side of the expression is not a number
    NotANumber,
    /// Negative, infinite or NaN value
    OutOfRange,
}

impl MalformedReason {
    pub fn description(&self) -> &'static str {
        match self {
            MalformedReason::NotANumber => "not a number",
            MalformedReason::OutOfRange => "negative or non-finite value",
        }
    }
}

/// Outcome of reading a quantity cell.
///
/// Missing and malformed cells both count as zero in the report, but are kept
/// apart here so summaries can point at the rows that need fixing.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityParse {
    Missing,
    Parsed(ParsedQuantity),
    Malformed { raw: String, reason: MalformedReason },
}

impl QuantityParse {
    /// Collapse to the quantity used for aggregation
    pub fn quantity(&self) -> ParsedQuantity {
        match self {
            QuantityParse::Parsed(q) => *q,
            QuantityParse::Missing | QuantityParse::Malformed { .. } => ParsedQuantity::zero(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, QuantityParse::Malformed { .. })
    }
}

/// A malformed quantity cell, reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityIssue {
    /// Position of the row in the input (1-based)
    pub row: usize,
    pub item_name: String,
    pub raw: String,
    pub reason: MalformedReason,
}

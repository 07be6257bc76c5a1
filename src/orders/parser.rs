//! Cell parsing and normalization
//!
//! Turns raw spreadsheet text into quantities, prices and grouping labels.
//! Nothing in here fails: unreadable input degrades to a zero or a
//! placeholder, and the reason is kept in [`QuantityParse`] for reporting.

use crate::models::{MalformedReason, ParsedQuantity, QuantityParse};

/// Placeholder for a missing unit cell
pub const MISSING_UNIT: &str = "-";
/// Placeholder for a missing category cell
pub const MISSING_CATEGORY: &str = "Uncategorized";

/// Classify a quantity expression
///
/// Examples:
/// - `"10"` -> Parsed { base: 10, free: 0 }
/// - `"10+2"` -> Parsed { base: 10, free: 2 }
/// - `"+2"` -> Parsed { base: 0, free: 2 }
/// - `"abc+2"` -> Malformed (the whole expression is rejected)
/// - `None` or `""` -> Missing
///
/// With more than one `+`, only the first two pieces are read.
pub fn classify_quantity(raw: Option<&str>) -> QuantityParse {
    let Some(raw) = raw else {
        return QuantityParse::Missing;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return QuantityParse::Missing;
    }

    let parsed = if trimmed.contains('+') {
        let mut parts = trimmed.split('+');
        let base = parse_side(parts.next().unwrap_or(""));
        let free = parse_side(parts.next().unwrap_or(""));
        base.and_then(|b| free.map(|f| ParsedQuantity::new(b, f)))
    } else {
        parse_number(trimmed).map(|b| ParsedQuantity::new(b, 0.0))
    };

    match parsed {
        Ok(q) => QuantityParse::Parsed(q),
        Err(reason) => QuantityParse::Malformed {
            raw: raw.to_string(),
            reason,
        },
    }
}

/// Parse a quantity expression, treating anything unreadable as zero
pub fn parse_quantity(raw: Option<&str>) -> ParsedQuantity {
    classify_quantity(raw).quantity()
}

/// One side of a `base+free` expression; blank means zero
fn parse_side(s: &str) -> Result<f64, MalformedReason> {
    let s = s.trim();
    if s.is_empty() {
        Ok(0.0)
    } else {
        parse_number(s)
    }
}

fn parse_number(s: &str) -> Result<f64, MalformedReason> {
    let value: f64 = s.parse().map_err(|_| MalformedReason::NotANumber)?;
    if !value.is_finite() || value < 0.0 {
        return Err(MalformedReason::OutOfRange);
    }
    // -0.0 + 0.0 == 0.0
    Ok(value + 0.0)
}

/// Trimmed unit, or `"-"` when the cell is empty
pub fn normalize_unit(raw: Option<&str>) -> String {
    raw.map(|u| u.trim().to_string())
        .unwrap_or_else(|| MISSING_UNIT.to_string())
}

/// Trimmed category, or `"Uncategorized"` when the cell is empty
pub fn normalize_category(raw: Option<&str>) -> String {
    raw.map(|c| c.trim().to_string())
        .unwrap_or_else(|| MISSING_CATEGORY.to_string())
}

/// Numeric MRP, or 0 when the cell is empty or not a finite number
pub fn normalize_mrp(raw: Option<&str>) -> f64 {
    raw.and_then(|m| m.trim().parse::<f64>().ok())
        .filter(|m| m.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_plus_free() {
        assert_eq!(parse_quantity(Some("10+2")), ParsedQuantity::new(10.0, 2.0));
    }

    #[test]
    fn test_parse_base_only() {
        assert_eq!(parse_quantity(Some("10")), ParsedQuantity::new(10.0, 0.0));
        assert_eq!(parse_quantity(Some("2.5")), ParsedQuantity::new(2.5, 0.0));
    }

    #[test]
    fn test_parse_empty_and_missing() {
        assert_eq!(parse_quantity(Some("")), ParsedQuantity::zero());
        assert_eq!(parse_quantity(Some("   ")), ParsedQuantity::zero());
        assert_eq!(parse_quantity(None), ParsedQuantity::zero());
        assert_eq!(classify_quantity(None), QuantityParse::Missing);
    }

    #[test]
    fn test_partial_failure_rejects_whole_expression() {
        assert_eq!(parse_quantity(Some("abc+2")), ParsedQuantity::zero());
        assert_eq!(parse_quantity(Some("10+x")), ParsedQuantity::zero());
        assert!(classify_quantity(Some("abc+2")).is_malformed());
    }

    #[test]
    fn test_parse_blank_sides() {
        assert_eq!(parse_quantity(Some("+2")), ParsedQuantity::new(0.0, 2.0));
        assert_eq!(parse_quantity(Some("10+")), ParsedQuantity::new(10.0, 0.0));
        assert_eq!(parse_quantity(Some("+")), ParsedQuantity::zero());
        assert!(!classify_quantity(Some("+")).is_malformed());
    }

    #[test]
    fn test_parse_whitespace_around_sides() {
        assert_eq!(parse_quantity(Some(" 10 + 2 ")), ParsedQuantity::new(10.0, 2.0));
    }

    #[test]
    fn test_parse_extra_plus_pieces_ignored() {
        assert_eq!(parse_quantity(Some("10+2+3")), ParsedQuantity::new(10.0, 2.0));
    }

    #[test]
    fn test_parse_negative_and_non_finite() {
        match classify_quantity(Some("-5")) {
            QuantityParse::Malformed { raw, reason } => {
                assert_eq!(raw, "-5");
                assert_eq!(reason, MalformedReason::OutOfRange);
            }
            other => panic!("expected malformed, got {:?}", other),
        }
        assert_eq!(parse_quantity(Some("inf")), ParsedQuantity::zero());
        assert_eq!(parse_quantity(Some("NaN+1")), ParsedQuantity::zero());
    }

    #[test]
    fn test_malformed_reason_not_a_number() {
        match classify_quantity(Some("ten")) {
            QuantityParse::Malformed { reason, .. } => {
                assert_eq!(reason, MalformedReason::NotANumber)
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit(None), "-");
        assert_eq!(normalize_unit(Some("  kg ")), "kg");
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(None), "Uncategorized");
        assert_eq!(normalize_category(Some(" Food\t")), "Food");
    }

    #[test]
    fn test_normalize_mrp() {
        assert_eq!(normalize_mrp(Some("50")), 50.0);
        assert_eq!(normalize_mrp(Some(" 12.5 ")), 12.5);
        assert_eq!(normalize_mrp(Some("N/A")), 0.0);
        assert_eq!(normalize_mrp(Some("inf")), 0.0);
        assert_eq!(normalize_mrp(None), 0.0);
    }
}

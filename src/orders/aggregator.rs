//! Order aggregation
//!
//! Collapses raw rows onto (category, item, unit) groups and sums their
//! quantities.

use indexmap::IndexMap;

use super::parser::{
    classify_quantity, normalize_category, normalize_mrp, normalize_unit, parse_quantity,
};
use crate::models::{AggregateRow, OrderSummary, QuantityIssue, QuantityParse, RawRow, ReportTotals};

type GroupKey = (String, String, String);

/// Aggregate raw rows into report lines plus grand totals
///
/// Groups are collected in the order they first appear, so the MRP of a group
/// is the MRP of its first row. Lines come out sorted by category, item name
/// and then unit.
pub fn aggregate(rows: &[RawRow]) -> (Vec<AggregateRow>, ReportTotals) {
    let mut groups: IndexMap<GroupKey, AggregateRow> = IndexMap::new();

    for row in rows {
        let category = normalize_category(row.category.as_deref());
        let unit = normalize_unit(row.unit.as_deref());
        let qty = parse_quantity(row.quantity_expr.as_deref());

        let key = (category.clone(), row.item_name.clone(), unit.clone());
        let group = groups.entry(key).or_insert_with(|| AggregateRow {
            category,
            item_name: row.item_name.clone(),
            unit,
            quantity: 0.0,
            free_quantity: 0.0,
            mrp: normalize_mrp(row.mrp.as_deref()),
        });
        group.quantity += qty.base;
        group.free_quantity += qty.free;
    }

    let mut result: Vec<AggregateRow> = groups.into_values().collect();
    result.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.item_name.cmp(&b.item_name))
            .then_with(|| a.unit.cmp(&b.unit))
    });

    let totals = ReportTotals::from_rows(&result);
    (result, totals)
}

/// List the rows whose quantity expression could not be read
pub fn collect_quantity_issues(rows: &[RawRow]) -> Vec<QuantityIssue> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| match classify_quantity(row.quantity_expr.as_deref()) {
            QuantityParse::Malformed { raw, reason } => {
                tracing::debug!(row = i + 1, item = %row.item_name, raw = %raw, "Unreadable quantity counted as zero");
                Some(QuantityIssue {
                    row: i + 1,
                    item_name: row.item_name.clone(),
                    raw,
                    reason,
                })
            }
            QuantityParse::Missing | QuantityParse::Parsed(_) => None,
        })
        .collect()
}

/// Aggregate rows and attach the bookkeeping a report summary carries
pub fn summarize(rows: &[RawRow], rows_skipped: usize) -> OrderSummary {
    let (aggregated, totals) = aggregate(rows);
    let quantity_issues = collect_quantity_issues(rows);

    if !quantity_issues.is_empty() {
        tracing::warn!(
            "{} of {} rows had unreadable quantities and were counted as zero",
            quantity_issues.len(),
            rows.len()
        );
    }
    tracing::info!(
        "Aggregated {} rows into {} report lines",
        rows.len(),
        aggregated.len()
    );

    OrderSummary {
        rows: aggregated,
        totals,
        rows_read: rows.len() + rows_skipped,
        rows_skipped,
        quantity_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MalformedReason;

    fn row(item: &str, category: &str, mrp: &str, qty: &str, unit: &str) -> RawRow {
        RawRow::new(item, Some(category), Some(mrp), Some(qty), Some(unit))
    }

    #[test]
    fn test_rice_example() {
        let rows = vec![
            row("Rice", "Food", "50", "10+2", "kg"),
            row("Rice", "Food", "50", "5", "kg"),
        ];
        let (result, totals) = aggregate(&rows);

        assert_eq!(
            result,
            vec![AggregateRow {
                category: "Food".to_string(),
                item_name: "Rice".to_string(),
                unit: "kg".to_string(),
                quantity: 15.0,
                free_quantity: 2.0,
                mrp: 50.0,
            }]
        );
        assert_eq!(totals.total_quantity, 15.0);
        assert_eq!(totals.total_free_quantity, 2.0);
    }

    #[test]
    fn test_first_mrp_wins() {
        let rows = vec![
            row("Soap", "Home", "30", "4", "pcs"),
            row("Soap", "Home", "35", "6+1", "pcs"),
        ];
        let (result, _) = aggregate(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].mrp, 30.0);
        assert_eq!(result[0].quantity, 10.0);
        assert_eq!(result[0].free_quantity, 1.0);
    }

    #[test]
    fn test_reordering_within_group_keeps_sums() {
        let forward = vec![
            row("Oil", "Food", "120", "1+1", "ltr"),
            row("Oil", "Food", "110", "3", "ltr"),
            row("Oil", "Food", "100", "2+0.5", "ltr"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let (a, _) = aggregate(&forward);
        let (b, _) = aggregate(&reversed);

        assert_eq!(a[0].quantity, b[0].quantity);
        assert_eq!(a[0].free_quantity, b[0].free_quantity);
        assert_eq!(a[0].mrp, 120.0);
        assert_eq!(b[0].mrp, 100.0);
    }

    #[test]
    fn test_sorted_by_category_then_item() {
        let rows = vec![
            row("Zinc", "B", "1", "1", "pcs"),
            row("Apple", "B", "1", "1", "pcs"),
            row("Mango", "A", "1", "1", "pcs"),
        ];
        let (result, _) = aggregate(&rows);
        let order: Vec<(&str, &str)> = result
            .iter()
            .map(|r| (r.category.as_str(), r.item_name.as_str()))
            .collect();
        assert_eq!(order, vec![("A", "Mango"), ("B", "Apple"), ("B", "Zinc")]);
    }

    #[test]
    fn test_same_item_sorted_by_unit() {
        let rows = vec![
            row("Rice", "Food", "50", "1", "kg"),
            row("Rice", "Food", "5", "2", "bag"),
            row("Rice", "Food", "55", "3", "kg"),
        ];
        let (result, _) = aggregate(&rows);
        let units: Vec<&str> = result.iter().map(|r| r.unit.as_str()).collect();
        assert_eq!(units, vec!["bag", "kg"]);
        assert_eq!(result[0].mrp, 5.0);
        assert_eq!(result[1].mrp, 50.0);
        assert_eq!(result[1].quantity, 4.0);
    }

    #[test]
    fn test_units_split_groups() {
        let rows = vec![
            row("Sugar", "Food", "40", "2", "kg"),
            row("Sugar", "Food", "40", "3", " kg "),
            row("Sugar", "Food", "400", "1", "bag"),
        ];
        let (result, totals) = aggregate(&rows);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].unit, "bag");
        assert_eq!(result[1].quantity, 5.0);
        assert_eq!(totals.total_quantity, 6.0);
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let rows = vec![RawRow::new("Salt", None, None, None, None)];
        let (result, totals) = aggregate(&rows);
        assert_eq!(result[0].category, "Uncategorized");
        assert_eq!(result[0].unit, "-");
        assert_eq!(result[0].mrp, 0.0);
        assert_eq!(result[0].quantity, 0.0);
        assert_eq!(totals, ReportTotals::default());
    }

    #[test]
    fn test_empty_input() {
        let (result, totals) = aggregate(&[]);
        assert!(result.is_empty());
        assert_eq!(totals, ReportTotals::default());
    }

    #[test]
    fn test_collect_quantity_issues() {
        let rows = vec![
            row("Rice", "Food", "50", "10+2", "kg"),
            row("Dal", "Food", "90", "abc+2", "kg"),
            RawRow::new("Salt", Some("Food"), None, None, None),
        ];
        let issues = collect_quantity_issues(&rows);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row, 2);
        assert_eq!(issues[0].item_name, "Dal");
        assert_eq!(issues[0].raw, "abc+2");
        assert_eq!(issues[0].reason, MalformedReason::NotANumber);
    }

    #[test]
    fn test_summarize_counts() {
        let rows = vec![
            row("Rice", "Food", "50", "10+2", "kg"),
            row("Dal", "Food", "90", "oops", "kg"),
        ];
        let summary = summarize(&rows, 3);
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows_read, 5);
        assert_eq!(summary.rows_skipped, 3);
        assert_eq!(summary.quantity_issues.len(), 1);
        assert_eq!(summary.totals.total_quantity, 10.0);
    }
}

//! Utility to turn an order spreadsheet into a PDF report from the command line
//!
//! Usage: order_report <input.xlsx|input.csv> [output.pdf]

use ferrite_orders::config::ReportConfig;
use ferrite_orders::tools::{orders, reports};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(input) = args.get(1) else {
        eprintln!("Usage: order_report <input.xlsx|input.csv> [output.pdf]");
        std::process::exit(2);
    };
    let output = args.get(2).map(String::as_str);

    let config = ReportConfig::from_env();
    println!("Reading sheet '{}' from {}", config.sheet_name, input);

    let summary = orders::summarize_order(input, &config)?;
    for row in &summary.display_rows {
        println!(
            "{:>8}  {:<20}  {:<40}  {:<8}  {:>8}  {:>8}",
            row.mrp, row.category, row.item_name, row.unit, row.quantity, row.free_quantity
        );
    }
    println!(
        "{:>8}  {:<20}  {:<40}  {:<8}  {:>8}  {:>8}",
        "", "", "TOTAL ITEMS", "", summary.display_totals.quantity, summary.display_totals.free_quantity
    );

    for issue in &summary.summary.quantity_issues {
        println!(
            "Row {} ({}): could not read quantity '{}', {}",
            issue.row,
            issue.item_name,
            issue.raw,
            issue.reason.description()
        );
    }

    let generated_at = chrono::Local::now().naive_local();
    let report = reports::generate_report_from_summary(&summary.summary, output, &config, generated_at)?;
    println!("{}", report.message);
    println!("Saved to {}", report.file_path);

    Ok(())
}

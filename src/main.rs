//! Ferrite Agencies order reports
//!
//! An MCP server that aggregates order spreadsheets into PDF reports.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use ferrite_orders::build_info;
use ferrite_orders::config::ReportConfig;
use ferrite_orders::mcp::OrderReportService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they stay out of the MCP stdio stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ferrite_orders=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = ReportConfig::from_env();
    eprintln!("Output directory: {}", config.output_dir.display());
    eprintln!("Order sheet: {}", config.sheet_name);

    std::fs::create_dir_all(&config.output_dir)?;

    let service = OrderReportService::new(config);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}

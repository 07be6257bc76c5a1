//! Order report MCP server implementation
//!
//! Exposes order summaries and PDF report generation as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::ReportConfig;
use crate::tools::orders;
use crate::tools::reports;
use crate::tools::status::StatusTracker;

/// Order report MCP service
#[derive(Clone)]
pub struct OrderReportService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: Arc<ReportConfig>,
    tool_router: ToolRouter<OrderReportService>,
}

impl OrderReportService {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config.output_dir.clone()))),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Server configuration with any per-call overrides applied
    fn request_config(&self, sheet_name: Option<String>) -> ReportConfig {
        let mut config = (*self.config).clone();
        if let Some(name) = sheet_name.filter(|n| !n.trim().is_empty()) {
            config.sheet_name = name;
        }
        config
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummarizeOrderParams {
    /// Full path to the order file (.xlsx, .xls, .ods or .csv)
    pub file_path: String,
    /// Sheet to read instead of the configured one (workbooks only)
    pub sheet_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateOrderReportParams {
    /// Full path to the order file (.xlsx, .xls, .ods or .csv)
    pub file_path: String,
    /// Where to write the PDF (default: output directory, Ferrite_Order_HHMMSS.pdf)
    pub output_path: Option<String>,
    /// Sheet to read instead of the configured one (workbooks only)
    pub sheet_name: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl OrderReportService {
    #[tool(description = "Get the current status of the order report service including build info, output directory, reports generated and process information")]
    async fn report_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for the expected spreadsheet layout, quantity format (e.g. 10+2) and report tools. Call this before working with a new order file.")]
    fn report_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::REPORT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(REPORT_INSTRUCTIONS)]))
    }

    #[tool(description = "Read an order spreadsheet and return the aggregated lines (per category, item and unit), totals, and any quantities that could not be read")]
    fn summarize_order(&self, Parameters(p): Parameters<SummarizeOrderParams>) -> Result<CallToolResult, McpError> {
        let config = self.request_config(p.sheet_name);
        let result = orders::summarize_order(&p.file_path, &config)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Generate the Ferrite Agencies PDF order report from an order spreadsheet. Returns the PDF path and totals.")]
    async fn generate_order_report(&self, Parameters(p): Parameters<GenerateOrderReportParams>) -> Result<CallToolResult, McpError> {
        let config = self.request_config(p.sheet_name);
        let generated_at = chrono::Local::now().naive_local();

        let result = reports::generate_order_report(&p.file_path, p.output_path.as_deref(), &config, generated_at)
            .map_err(|e| {
                tracing::error!("Order report failed for {}: {}", p.file_path, e);
                McpError::internal_error(e, None)
            })?;

        self.status_tracker.lock().await.record_report(&result.file_path);

        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for OrderReportService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ferrite-orders".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Ferrite Agencies Order Reports".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Ferrite Agencies order reports - aggregate order spreadsheets and render PDF reports. \
                 Call report_instructions first for the expected sheet layout. \
                 summarize_order: check aggregation and unreadable quantities. \
                 generate_order_report: write the PDF. \
                 report_status: build info and report count."
                    .into(),
            ),
        }
    }
}

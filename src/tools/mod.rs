//! Order report tools module
//!
//! Tool implementations behind the MCP server and the CLI.

pub mod orders;
pub mod reports;
pub mod status;

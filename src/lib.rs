//! Ferrite Agencies order report library
//!
//! Order spreadsheet aggregation and PDF report rendering.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod orders;
pub mod sheet;
pub mod tools;

//! KetoScan Tools module
//!
//! MCP tool implementations for KetoScan.

pub mod labels;
pub mod status;

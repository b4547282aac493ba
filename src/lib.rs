//! KetoScan Library
//!
//! Keto analysis of nutrition labels: per-100 g normalisation, net carbs,
//! fat dominance, glycemic load and a keto score.

pub mod analysis;
pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tables;
pub mod tools;

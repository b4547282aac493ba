//! Build information
//!
//! Version, build time and the fingerprint of the reference tables compiled
//! into the binary.

use serde::Serialize;

use crate::tables::TableCounts;

/// Fingerprint of the embedded `data/` tables
pub const EMBEDDED_TABLES_DIGEST: &str = match option_env!("KETOSCAN_TABLES_DIGEST") {
    Some(s) => s,
    None => "unknown",
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("KETOSCAN_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub embedded_tables_digest: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_timestamp: BUILD_TIMESTAMP,
            embedded_tables_digest: EMBEDDED_TABLES_DIGEST,
        }
    }
}

/// Banner text for the tables actually in use
pub fn banner_lines(tables_source: &str, counts: &TableCounts) -> Vec<String> {
    let info = BuildInfo::current();
    vec![
        format!("KetoScan {} (built {})", info.version, info.build_timestamp),
        format!("Tables: {} [embedded digest {}]", tables_source, info.embedded_tables_digest),
        format!(
            "  {} GI foods, {} sugar alcohols, {} categories, {} daily values",
            counts.gi_foods, counts.sugar_alcohols, counts.categories, counts.daily_values
        ),
    ]
}

/// Print the startup banner to stderr
pub fn print_startup_banner(tables_source: &str, counts: &TableCounts) {
    for line in banner_lines(tables_source, counts) {
        eprintln!("{}", line);
    }
}

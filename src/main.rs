//! KetoScan
//!
//! An MCP server for keto analysis of nutrition labels.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use ketoscan::build_info;
use ketoscan::config::Settings;
use ketoscan::mcp::KetoScanService;
use ketoscan::tables::{self, ReferenceTables};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ketoscan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env()?;

    // Load reference tables
    let (loaded, tables_source) = match &settings.tables_dir {
        Some(dir) => (ReferenceTables::load_dir(dir)?, dir.display().to_string()),
        None => (ReferenceTables::embedded(), "embedded".to_string()),
    };
    let tables = tables::install(loaded);

    // Print startup banner to stderr
    build_info::print_startup_banner(&tables_source, &tables.counts());
    eprintln!("Starting MCP server on stdio...");

    // Create the KetoScan service
    let service = KetoScanService::new(tables, tables_source, settings.thresholds);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}

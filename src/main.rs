//! Health Tracker
//!
//! MCP server for calorie estimation and health intake prompts.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use healthtrack::config::{Config, DEFAULT_LOG_DIRECTIVE};
use healthtrack::mcp::HealthTrackService;
use healthtrack::{build_info, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    tracing::info!("Database path: {}", config.database_path.display());

    let database = config.open_database()?;
    let version = database.with_conn(db::migrations::get_schema_version)?;
    tracing::info!("Database schema version: {}", version);

    let service = HealthTrackService::new(config.database_path, database);

    tracing::info!("Starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}

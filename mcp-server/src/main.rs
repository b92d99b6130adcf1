//! Moderation MCP Server
//!
//! Exposes the moderation API as MCP tools over stdio:
//! - Profile risk evaluation
//! - Activity analysis
//! - Report triage
//! - Profile and post lookup

mod client;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::SubmindServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting moderation MCP server");

    let server = SubmindServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}

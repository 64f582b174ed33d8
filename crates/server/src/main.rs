//! ustawka server entry point.
//!
//! Boots the MCP server on stdio transport, backed by the SQLite act cache and
//! the Sejm ELI registry. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use ustawka_client::{SejmClient, SejmConfig};
use ustawka_core::{ActService, AppConfig, CacheDb, Metrics};

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let cache = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache database {}", config.db_path.display()))?;
    let client = SejmClient::new(SejmConfig::from(&config)).context("building registry client")?;

    let service = ActService::new(Arc::new(client), Arc::new(cache), Arc::new(Metrics::new()), &config);
    tracing::info!(
        db_path = %config.db_path.display(),
        base_url = %config.base_url,
        settings = ?service.settings(),
        "Starting ustawka server on stdio transport"
    );

    let handler = handler::UstawkaServer::new(service);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}

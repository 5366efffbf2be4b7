use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;
use tracing_subscriber::{self, EnvFilter};

use payoff_mcp::config::PayoffConfig;
use payoff_mcp::server::{http_router, PayoffServer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(PayoffConfig::from_env()?);
    tracing::debug!(?config, "Configuration loaded");

    if let Some(port) = config.port {
        // HTTP mode: streamable MCP transport for hosted deployments
        let app = http_router(config.clone());

        let addr = format!("0.0.0.0:{port}");
        tracing::info!("Starting payoff-mcp HTTP server on {addr}");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
    } else {
        // stdio mode: local MCP clients
        tracing::info!("Starting payoff-mcp MCP server (stdio)");

        let server = PayoffServer::new(config);
        let service = server.serve(rmcp::transport::stdio()).await?;
        service.waiting().await?;
    }

    Ok(())
}

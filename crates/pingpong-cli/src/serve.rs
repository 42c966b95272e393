//! Server startup and shutdown.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use pingpong_config::ServerConfig;
use pingpong_tools::{Dispatcher, OperationRegistry};
use pingpong_transport_stdio::{McpHandler, McpServer, StdioTransport};

/// Serves MCP over stdio until stdin closes or SIGINT/SIGTERM arrives.
pub async fn execute(config: &ServerConfig) -> anyhow::Result<()> {
    info!(
        server_name = %config.server_name,
        log_level = %config.log_level,
        environment = %config.environment,
        "Starting MCP Ping Pong Server"
    );

    let registry = OperationRegistry::with_defaults().context("failed to register tools")?;
    let handler = McpHandler::new(
        Dispatcher::new(Arc::new(registry)),
        config.server_name.clone(),
    );
    let mut server = McpServer::new(StdioTransport::stdio(), handler);
    info!("MCP Ping Pong Server started successfully");

    tokio::select! {
        result = server.run() => {
            result.context("MCP server failed")?;
        }
        signal = shutdown_signal() => {
            info!("Received {}, shutting down gracefully", signal?);
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> anyhow::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt()).context("cannot listen for SIGINT")?;
    let mut terminate = signal(SignalKind::terminate()).context("cannot listen for SIGTERM")?;
    tokio::select! {
        _ = interrupt.recv() => Ok("SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> anyhow::Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("cannot listen for Ctrl-C")?;
    Ok("SIGINT")
}

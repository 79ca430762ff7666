//! Acumatica MCP Server
//!
//! Entry point for the MCP server binary.
//! Implements MCP protocol over stdio using JSON-RPC 2.0.

use acumatica_mcp::api::AcumaticaClient;
use acumatica_mcp::auth::AcumaticaSession;
use acumatica_mcp::config::Config;
use acumatica_mcp::mcp::{AcumaticaMcpServer, JsonRpcRequest, JsonRpcResponse};
use anyhow::Context;
use futures::StreamExt;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::signal;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ACU_* variables may come from a local .env file
    dotenvy::dotenv().ok();

    // Initialize logging to stderr (MCP uses stdout for protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Acumatica MCP Server...");

    // Load configuration
    let config = Config::load_default()?;
    let runtime_config = Arc::new(config.to_runtime().context("invalid configuration")?);

    tracing::info!(
        "Configured for {} (endpoint {}, contract version {})",
        runtime_config.base_url,
        runtime_config.endpoint,
        runtime_config.version
    );

    // Shared session and entity API client
    let session = Arc::new(AcumaticaSession::new(runtime_config.clone()));
    let client = Arc::new(AcumaticaClient::new(session.clone(), runtime_config));

    // Create MCP server
    let server = AcumaticaMcpServer::new(client);

    tracing::info!("MCP Server ready, listening on stdio...");

    // Run stdio message loop
    run_stdio_loop(server).await?;

    // Drop the server-side session on the way out
    session.logout().await;

    Ok(())
}

async fn run_stdio_loop(server: AcumaticaMcpServer) -> anyhow::Result<()> {
    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    let mut stdout = tokio::io::stdout();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next() => match line {
                Some(line) => line?,
                None => break,
            },
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        tracing::debug!("Received: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                let response =
                    JsonRpcResponse::error(None, -32700, &format!("Parse error: {}", e));
                send_response(&mut stdout, &response).await?;
                continue;
            }
        };

        if let Some(response) = server.handle_request(request).await {
            send_response(&mut stdout, &response).await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn send_response(
    stdout: &mut tokio::io::Stdout,
    response: &JsonRpcResponse,
) -> anyhow::Result<()> {
    let json = serde_json::to_string(response)?;
    tracing::debug!("Sending: {}", json);
    stdout.write_all(json.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

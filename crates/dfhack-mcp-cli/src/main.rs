//! Dwarf Fortress MCP Server
//!
//! Connects to a running Dwarf Fortress game through DFHack's RPC listener
//! and serves its state over HTTP routes, MCP over HTTP (`POST /mcp`) or MCP
//! over stdio.
//!
//! ## Configuration (flags / env)
//!
//! | Flag               | Env                | Default          | Description                  |
//! |--------------------|--------------------|------------------|------------------------------|
//! | `--dfhack-address` | `DFHACK_ADDRESS`   | `127.0.0.1:5000` | DFHack RPC listener          |
//! | `--host`           | `DFHACK_MCP_HOST`  | `0.0.0.0`        | HTTP bind address            |
//! | `--port`           | `DFHACK_MCP_PORT`  | `8000`           | HTTP port                    |
//! | `--stdio`          | `DFHACK_MCP_STDIO` | off              | Serve MCP on stdio, no HTTP  |
//!
//! Log level comes from `RUST_LOG` (default `info`). Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use dfhack_remote::{RemoteClient, RemoteConfig};
use dfhack_server::{Connection, DfHackServer};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dfhack-mcp-server",
    about = "A MCP server that connects to a locally running Dwarf Fortress game through DFHack's RPC connection.",
    version
)]
struct Args {
    /// DFHack RPC address (host:port)
    #[arg(long, env = "DFHACK_ADDRESS", default_value = "127.0.0.1:5000")]
    dfhack_address: String,

    /// HTTP bind address
    #[arg(long, env = "DFHACK_MCP_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// HTTP port
    #[arg(long, env = "DFHACK_MCP_PORT", default_value_t = 8000)]
    port: u16,

    /// Serve MCP over stdin/stdout instead of HTTP
    #[arg(long, env = "DFHACK_MCP_STDIO")]
    stdio: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout belongs to the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Dwarf Fortress MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = RemoteConfig {
        address: args.dfhack_address.clone(),
    };
    let connection = Connection::acquire(|| RemoteClient::connect(&config))
        .await
        .with_context(|| format!("DFHack is not reachable at {}", config.address))?;

    let server = DfHackServer::new(connection.handle());
    let outcome = match shutdown_signal() {
        Ok(shutdown) if args.stdio => until_shutdown(server.run_stdio(), shutdown)
            .await
            .context("stdio transport failed"),
        Ok(shutdown) => {
            let addr = SocketAddr::new(args.host, args.port);
            server
                .run_http(addr, shutdown)
                .await
                .with_context(|| format!("HTTP server on {} failed", addr))
        }
        Err(e) => Err(e),
    };

    connection.release().await;
    outcome
}

/// Run `serve` until it ends or `shutdown` resolves, whichever comes first
async fn until_shutdown<F, S, E>(serve: F, shutdown: S) -> std::result::Result<(), E>
where
    F: Future<Output = std::result::Result<(), E>>,
    S: Future<Output = ()>,
{
    tokio::select! {
        outcome = serve => outcome,
        _ = shutdown => {
            info!("Stopping stdio transport");
            Ok(())
        }
    }
}

/// Resolves on SIGTERM or SIGINT
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM"),
            _ = sigint.recv() => info!("Received SIGINT (Ctrl+C)"),
        }
    })
}

/// Resolves on Ctrl+C
#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    Ok(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C");
        }
    })
}

//! # dfhack-server
//!
//! HTTP and MCP facade over a running DFHack instance.
//!
//! This crate provides:
//! - `DfHackClient` trait for plugging in an RPC channel
//! - Endpoint translators mapping RPC replies to JSON records
//! - An axum router with one route per endpoint and `POST /mcp`
//! - MCP JSON-RPC handling over HTTP and stdio
//! - Connection lifecycle around serving

pub mod client;
pub mod endpoints;
pub mod http;
pub mod lifecycle;
pub mod mcp;
pub mod tools;
pub mod transport;

pub use client::{DfHackClient, SharedClient};
pub use endpoints::Endpoint;
pub use lifecycle::Connection;
pub use mcp::ServerInfo;

use dfhack_core::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// DFHack MCP server
pub struct DfHackServer {
    /// Connection handle shared by all requests
    client: SharedClient,
    /// Identity advertised to MCP clients
    info: ServerInfo,
}

impl DfHackServer {
    /// Create a new server around an acquired connection
    pub fn new(client: SharedClient) -> Self {
        Self::with_info(client, ServerInfo::default())
    }

    pub fn with_info(client: SharedClient, info: ServerInfo) -> Self {
        Self { client, info }
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Build the HTTP router
    pub fn router(self: Arc<Self>) -> axum::Router {
        http::router(self)
    }

    /// Serve HTTP on `addr` until `shutdown` resolves
    pub async fn run_http<F>(self, addr: SocketAddr, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await?;
        info!("HTTP server listening on {}", listener.local_addr()?);
        info!("MCP endpoint: http://{}/mcp", addr);

        axum::serve(listener, Arc::new(self).router())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Run the server on stdio transport
    pub async fn run_stdio(self) -> Result<()> {
        transport::stdio::run(&self).await
    }
}

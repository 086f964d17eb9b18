//! Connection lifecycle: one channel per process, acquired before serving
//! and released after.

use crate::client::{DfHackClient, SharedClient};
use dfhack_core::Result;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The process-wide connection to the game
pub struct Connection {
    client: SharedClient,
}

impl Connection {
    /// Open the channel. An error here means the process must not serve.
    pub async fn acquire<C, F, Fut>(open: F) -> Result<Self>
    where
        C: DfHackClient,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C>>,
    {
        match open().await {
            Ok(client) => {
                info!("DFHack connection acquired");
                Ok(Self {
                    client: Arc::new(client),
                })
            }
            Err(e) => {
                error!("Failed to acquire DFHack connection: {}", e);
                Err(e)
            }
        }
    }

    /// Handle to inject into the request handlers
    pub fn handle(&self) -> SharedClient {
        Arc::clone(&self.client)
    }

    /// Close the channel. Teardown errors are logged, never returned.
    pub async fn release(self) {
        match self.client.close().await {
            Ok(()) => info!("DFHack connection released"),
            Err(e) => warn!("Error while closing DFHack connection: {}", e),
        }
    }
}

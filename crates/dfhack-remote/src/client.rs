//! `DfHackClient` over a DFHack remote session

use async_trait::async_trait;
use dfhack_core::proto::{
    EmptyMessage, GetWorldInfoOut, ListUnitsIn, ListUnitsOut, StringMessage, UnitList, ViewInfo,
};
use dfhack_core::{DfHackError, Result};
use dfhack_server::DfHackClient;
use prost::Message;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::channel::Channel;
use crate::methods::{self, RemoteMethod};

/// Where to find the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// `host:port` of the DFHack RPC listener
    pub address: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Client for a running DFHack instance
///
/// Calls are serialized over the one session. Each call runs in its own task
/// so a caller that goes away mid-call cannot leave a half-read reply on the
/// stream.
pub struct RemoteClient<S = TcpStream> {
    channel: Arc<Mutex<Channel<S>>>,
}

impl RemoteClient<TcpStream> {
    /// Connect and handshake
    pub async fn connect(config: &RemoteConfig) -> Result<Self> {
        info!("Connecting to DFHack at {}", config.address);

        let stream = TcpStream::connect(&config.address)
            .await
            .map_err(|e| DfHackError::Connect {
                address: config.address.clone(),
                reason: e.to_string(),
            })?;
        stream
            .set_nodelay(true)
            .map_err(|e| DfHackError::Connect {
                address: config.address.clone(),
                reason: e.to_string(),
            })?;

        let client = Self::with_stream(stream).await?;
        info!("Connected to DFHack at {}", config.address);
        Ok(client)
    }
}

impl<S> RemoteClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Handshake over an already open stream
    pub async fn with_stream(stream: S) -> Result<Self> {
        let channel = Channel::open(stream).await?;
        Ok(Self {
            channel: Arc::new(Mutex::new(channel)),
        })
    }

    pub async fn is_connected(&self) -> bool {
        self.channel.lock().await.is_connected()
    }

    /// Run one remote call to completion
    pub async fn call<In, Out>(&self, method: RemoteMethod, input: In) -> Result<Out>
    where
        In: Message + Send + Sync + 'static,
        Out: Message + Default + Send + 'static,
    {
        debug!("DFHack call {}", method.name);
        let channel = Arc::clone(&self.channel);
        tokio::spawn(async move { channel.lock().await.call(&method, &input).await })
            .await
            .map_err(|e| DfHackError::Ipc(format!("{} call aborted: {}", method.name, e)))?
    }

    /// Send quit and shut the stream down
    pub async fn disconnect(&self) -> Result<()> {
        self.channel.lock().await.close().await
    }

    async fn string_call(&self, method: RemoteMethod) -> Result<String> {
        let reply: StringMessage = self.call(method, EmptyMessage {}).await?;
        Ok(reply.value)
    }
}

#[async_trait]
impl<S> DfHackClient for RemoteClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    async fn get_version(&self) -> Result<String> {
        self.string_call(methods::GET_VERSION).await
    }

    async fn get_df_version(&self) -> Result<String> {
        self.string_call(methods::GET_DF_VERSION).await
    }

    async fn get_world_info(&self) -> Result<GetWorldInfoOut> {
        self.call(methods::GET_WORLD_INFO, EmptyMessage {}).await
    }

    async fn get_view_info(&self) -> Result<ViewInfo> {
        self.call(methods::GET_VIEW_INFO, EmptyMessage {}).await
    }

    async fn get_unit_list(&self) -> Result<UnitList> {
        self.call(methods::GET_UNIT_LIST, EmptyMessage {}).await
    }

    async fn list_units(&self, request: ListUnitsIn) -> Result<ListUnitsOut> {
        self.call(methods::LIST_UNITS, request).await
    }

    async fn close(&self) -> Result<()> {
        self.disconnect().await
    }
}

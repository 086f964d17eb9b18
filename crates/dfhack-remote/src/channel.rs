//! One DFHack session over a byte stream
//!
//! The channel owns the stream and the method id bindings made on it. It is
//! not shared by itself; [`crate::RemoteClient`] puts it behind a mutex.

use dfhack_core::proto::{CoreBindReply, CoreTextNotification};
use dfhack_core::{CommandResult, DfHackError, Result};
use prost::Message;
use std::collections::HashMap;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::frame::{
    BIND_METHOD_ID, HANDSHAKE_LEN, HEADER_LEN, RpcHeader, encode_request, handshake_request,
    parse_handshake_reply, reply_id,
};
use crate::methods::RemoteMethod;

/// A handshaken session
pub struct Channel<S> {
    /// `None` once closed or broken
    stream: Option<S>,
    bindings: HashMap<RemoteMethod, i16>,
}

impl<S> Channel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Run the handshake on a fresh stream
    pub async fn open(mut stream: S) -> Result<Self> {
        stream
            .write_all(&handshake_request())
            .await
            .map_err(|e| DfHackError::Handshake(format!("send failed: {}", e)))?;
        stream
            .flush()
            .await
            .map_err(|e| DfHackError::Handshake(format!("send failed: {}", e)))?;

        let mut reply = [0u8; HANDSHAKE_LEN];
        stream
            .read_exact(&mut reply)
            .await
            .map_err(|e| DfHackError::Handshake(format!("no reply: {}", e)))?;
        let version = parse_handshake_reply(&reply)?;
        debug!("DFHack handshake complete, protocol version {}", version);

        Ok(Self {
            stream: Some(stream),
            bindings: HashMap::new(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Call `method`, binding it first if this session has not yet
    pub async fn call<In, Out>(&mut self, method: &RemoteMethod, input: &In) -> Result<Out>
    where
        In: Message,
        Out: Message + Default,
    {
        let result = self.call_inner(method, input).await;
        if let Err(e @ (DfHackError::Ipc(_) | DfHackError::Protocol(_))) = &result {
            warn!("Dropping DFHack stream after {}: {}", method.name, e);
            self.stream = None;
            self.bindings.clear();
        }
        result
    }

    async fn call_inner<In, Out>(&mut self, method: &RemoteMethod, input: &In) -> Result<Out>
    where
        In: Message,
        Out: Message + Default,
    {
        let id = self.bind(method).await?;
        self.invoke(method.name, id, input).await
    }

    async fn bind(&mut self, method: &RemoteMethod) -> Result<i16> {
        if let Some(id) = self.bindings.get(method) {
            return Ok(*id);
        }

        let reply: CoreBindReply = self
            .invoke("BindMethod", BIND_METHOD_ID, &method.bind_request())
            .await?;
        let id = i16::try_from(reply.assigned_id).map_err(|_| {
            DfHackError::Protocol(format!(
                "method id {} for {} out of range",
                reply.assigned_id, method.name
            ))
        })?;

        debug!("Bound {} to id {}", method.name, id);
        self.bindings.insert(*method, id);
        Ok(id)
    }

    /// Send one request and read until its result or failure
    async fn invoke<In, Out>(&mut self, name: &str, id: i16, input: &In) -> Result<Out>
    where
        In: Message,
        Out: Message + Default,
    {
        let frame = encode_request(id, input)?;
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| DfHackError::Ipc("DFHack not connected".to_string()))?;

        stream
            .write_all(&frame)
            .await
            .map_err(|e| DfHackError::Ipc(format!("send failed: {}", e)))?;
        stream
            .flush()
            .await
            .map_err(|e| DfHackError::Ipc(format!("send failed: {}", e)))?;

        loop {
            let header = read_header(stream).await?;
            match header.id {
                reply_id::RESULT => {
                    let body = read_body(stream, header.body_len()?).await?;
                    return Ok(Out::decode(body.as_slice())?);
                }
                reply_id::FAIL => {
                    return Err(DfHackError::CommandFailed {
                        method: name.to_string(),
                        result: CommandResult::from(header.size),
                    });
                }
                reply_id::TEXT => {
                    let body = read_body(stream, header.body_len()?).await?;
                    log_text(&body);
                }
                reply_id::QUIT => {
                    return Err(DfHackError::Protocol(
                        "server ended the session".to_string(),
                    ));
                }
                other => {
                    return Err(DfHackError::Protocol(format!(
                        "unexpected reply id {}",
                        other
                    )));
                }
            }
        }
    }

    /// Send the quit header and shut the stream down
    pub async fn close(&mut self) -> Result<()> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        self.bindings.clear();

        stream
            .write_all(&RpcHeader::quit().to_bytes())
            .await
            .map_err(|e| DfHackError::Ipc(format!("quit failed: {}", e)))?;
        stream
            .shutdown()
            .await
            .map_err(|e| DfHackError::Ipc(format!("shutdown failed: {}", e)))?;
        info!("DFHack session closed");
        Ok(())
    }
}

async fn read_header<S: AsyncRead + Unpin>(stream: &mut S) -> Result<RpcHeader> {
    let mut buf = [0u8; HEADER_LEN];
    stream
        .read_exact(&mut buf)
        .await
        .map_err(|e| DfHackError::Ipc(format!("recv header failed: {}", e)))?;
    Ok(RpcHeader::from_bytes(&buf))
}

async fn read_body<S: AsyncRead + Unpin>(stream: &mut S, len: usize) -> Result<Vec<u8>> {
    let mut body = vec![0u8; len];
    stream
        .read_exact(&mut body)
        .await
        .map_err(|e| DfHackError::Ipc(format!("recv body failed: {}", e)))?;
    Ok(body)
}

fn log_text(body: &[u8]) {
    match CoreTextNotification::decode(body) {
        Ok(notification) => {
            let text: String = notification
                .fragments
                .into_iter()
                .map(|f| f.text)
                .collect();
            info!("DFHack: {}", text.trim_end());
        }
        Err(e) => warn!("Undecodable DFHack text notification: {}", e),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::frame::RESPONSE_MAGIC;
    use crate::methods::{GET_VERSION, GET_VIEW_INFO, GET_WORLD_INFO};
    use dfhack_core::proto::{
        CoreTextFragment, EmptyMessage, GetWorldInfoOut, StringMessage, ViewInfo,
    };
    use tokio_test::io::Builder;

    pub(crate) fn server_hello() -> Vec<u8> {
        let mut bytes = RESPONSE_MAGIC.to_vec();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes
    }

    /// Result reply carrying `message`
    pub(crate) fn result_frame<M: Message>(message: &M) -> Vec<u8> {
        let body = message.encode_to_vec();
        let mut bytes = RpcHeader::new(reply_id::RESULT, body.len() as i32)
            .to_bytes()
            .to_vec();
        bytes.extend_from_slice(&body);
        bytes
    }

    pub(crate) fn bind_request_frame(method: &RemoteMethod) -> Vec<u8> {
        encode_request(BIND_METHOD_ID, &method.bind_request()).unwrap()
    }

    pub(crate) fn bind_reply_frame(id: i32) -> Vec<u8> {
        result_frame(&CoreBindReply { assigned_id: id })
    }

    pub(crate) fn empty_call_frame(id: i16) -> Vec<u8> {
        encode_request(id, &EmptyMessage {}).unwrap()
    }

    #[tokio::test]
    async fn test_handshake() {
        let mock = Builder::new()
            .write(b"DFHack?\n\x01\x00\x00\x00")
            .read(&server_hello())
            .build();

        let channel = Channel::open(mock).await.unwrap();
        assert!(channel.is_connected());
    }

    #[tokio::test]
    async fn test_handshake_rejects_wrong_magic() {
        let mock = Builder::new()
            .write(&handshake_request())
            .read(b"SSH-2.0-\x01\x00\x00\x00")
            .build();

        let result = Channel::open(mock).await;
        assert!(matches!(result, Err(DfHackError::Handshake(_))));
    }

    #[tokio::test]
    async fn test_bind_then_call() {
        let mock = Builder::new()
            .write(&handshake_request())
            .read(&server_hello())
            .write(&bind_request_frame(&GET_VERSION))
            .read(&bind_reply_frame(12))
            .write(&empty_call_frame(12))
            .read(&result_frame(&StringMessage {
                value: "0.47.05-r8".into(),
            }))
            .build();

        let mut channel = Channel::open(mock).await.unwrap();
        let reply: StringMessage = channel.call(&GET_VERSION, &EmptyMessage {}).await.unwrap();
        assert_eq!(reply.value, "0.47.05-r8");
    }

    #[tokio::test]
    async fn test_binding_is_reused() {
        let view = ViewInfo {
            view_pos_x: Some(4),
            ..Default::default()
        };
        let mock = Builder::new()
            .write(&handshake_request())
            .read(&server_hello())
            .write(&bind_request_frame(&GET_VIEW_INFO))
            .read(&bind_reply_frame(40))
            .write(&empty_call_frame(40))
            .read(&result_frame(&view))
            .write(&empty_call_frame(40))
            .read(&result_frame(&view))
            .build();

        let mut channel = Channel::open(mock).await.unwrap();
        for _ in 0..2 {
            let reply: ViewInfo = channel.call(&GET_VIEW_INFO, &EmptyMessage {}).await.unwrap();
            assert_eq!(reply.view_pos_x, Some(4));
        }
    }

    #[tokio::test]
    async fn test_fail_reply_keeps_session() {
        let mock = Builder::new()
            .write(&handshake_request())
            .read(&server_hello())
            .write(&bind_request_frame(&GET_WORLD_INFO))
            .read(&bind_reply_frame(3))
            .write(&empty_call_frame(3))
            .read(&RpcHeader::new(reply_id::FAIL, 1).to_bytes())
            .build();

        let mut channel = Channel::open(mock).await.unwrap();
        let err = channel
            .call::<_, GetWorldInfoOut>(&GET_WORLD_INFO, &EmptyMessage {})
            .await
            .unwrap_err();

        match err {
            DfHackError::CommandFailed { method, result } => {
                assert_eq!(method, "GetWorldInfo");
                assert_eq!(result, CommandResult::Failure);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(channel.is_connected());
    }

    #[tokio::test]
    async fn test_text_notification_is_skipped() {
        let text = CoreTextNotification {
            fragments: vec![CoreTextFragment {
                text: "Loading world...\n".into(),
                color: Some(7),
            }],
        }
        .encode_to_vec();
        let mut text_frame = RpcHeader::new(reply_id::TEXT, text.len() as i32)
            .to_bytes()
            .to_vec();
        text_frame.extend_from_slice(&text);

        let mock = Builder::new()
            .write(&handshake_request())
            .read(&server_hello())
            .write(&bind_request_frame(&GET_VERSION))
            .read(&bind_reply_frame(1))
            .write(&empty_call_frame(1))
            .read(&text_frame)
            .read(&result_frame(&StringMessage {
                value: "50.11".into(),
            }))
            .build();

        let mut channel = Channel::open(mock).await.unwrap();
        let reply: StringMessage = channel.call(&GET_VERSION, &EmptyMessage {}).await.unwrap();
        assert_eq!(reply.value, "50.11");
    }

    #[tokio::test]
    async fn test_close_sends_quit() {
        let mock = Builder::new()
            .write(&handshake_request())
            .read(&server_hello())
            .write(&[0xfc, 0xff, 0, 0, 0, 0, 0, 0])
            .build();

        let mut channel = Channel::open(mock).await.unwrap();
        channel.close().await.unwrap();
        assert!(!channel.is_connected());

        // second close is a no-op
        channel.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_stream_dropped_after_eof() {
        let mock = Builder::new()
            .write(&handshake_request())
            .read(&server_hello())
            .write(&bind_request_frame(&GET_VERSION))
            .build();

        let mut channel = Channel::open(mock).await.unwrap();
        let first = channel
            .call::<_, StringMessage>(&GET_VERSION, &EmptyMessage {})
            .await
            .unwrap_err();
        assert!(matches!(first, DfHackError::Ipc(_)));
        assert!(!channel.is_connected());

        let second = channel
            .call::<_, StringMessage>(&GET_VERSION, &EmptyMessage {})
            .await
            .unwrap_err();
        assert!(second.to_string().contains("not connected"));
    }
}

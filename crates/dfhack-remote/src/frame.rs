//! DFHack remote protocol framing
//!
//! Every message after the handshake is an 8 byte header followed by
//! `size` bytes of protobuf body:
//!
//! ```text
//! i16 id | 2 bytes padding | i32 size     (little endian)
//! ```
//!
//! Requests carry the bound method id. Replies carry one of the negative
//! ids in [`reply_id`].

use dfhack_core::{DfHackError, Result};

/// Magic sent by the client to open a session
pub const REQUEST_MAGIC: &[u8; 8] = b"DFHack?\n";
/// Magic the server answers with
pub const RESPONSE_MAGIC: &[u8; 8] = b"DFHack!\n";
/// Protocol version sent in the handshake
pub const PROTOCOL_VERSION: i32 = 1;
/// Handshake length in either direction
pub const HANDSHAKE_LEN: usize = 12;

pub const HEADER_LEN: usize = 8;
/// Bodies larger than this are refused
pub const MAX_MESSAGE_SIZE: i32 = 64 * 1024 * 1024;

/// `BindMethod` is always method id 0
pub const BIND_METHOD_ID: i16 = 0;

/// Reply header ids
pub mod reply_id {
    /// Reply body follows
    pub const RESULT: i16 = -1;
    /// Call failed, size holds the command result code
    pub const FAIL: i16 = -2;
    /// Console text, then keep reading
    pub const TEXT: i16 = -3;
    /// Session ends
    pub const QUIT: i16 = -4;
}

/// Client handshake bytes
pub fn handshake_request() -> [u8; HANDSHAKE_LEN] {
    let mut buf = [0u8; HANDSHAKE_LEN];
    buf[..8].copy_from_slice(REQUEST_MAGIC);
    buf[8..].copy_from_slice(&PROTOCOL_VERSION.to_le_bytes());
    buf
}

/// Check the server handshake and return its version
pub fn parse_handshake_reply(data: &[u8; HANDSHAKE_LEN]) -> Result<i32> {
    if &data[..8] != RESPONSE_MAGIC {
        return Err(DfHackError::Handshake(format!(
            "unexpected magic {:?}",
            String::from_utf8_lossy(&data[..8])
        )));
    }
    Ok(i32::from_le_bytes([data[8], data[9], data[10], data[11]]))
}

/// A message header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcHeader {
    pub id: i16,
    pub size: i32,
}

impl RpcHeader {
    pub fn new(id: i16, size: i32) -> Self {
        Self { id, size }
    }

    /// Header closing the session
    pub fn quit() -> Self {
        Self::new(reply_id::QUIT, 0)
    }

    /// Serialize header to bytes
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[..2].copy_from_slice(&self.id.to_le_bytes());
        buf[4..].copy_from_slice(&self.size.to_le_bytes());
        buf
    }

    /// Parse header from bytes. Padding is ignored.
    pub fn from_bytes(data: &[u8; HEADER_LEN]) -> Self {
        Self {
            id: i16::from_le_bytes([data[0], data[1]]),
            size: i32::from_le_bytes([data[4], data[5], data[6], data[7]]),
        }
    }

    /// Body length of a result or text reply
    pub fn body_len(&self) -> Result<usize> {
        if self.size < 0 || self.size > MAX_MESSAGE_SIZE {
            return Err(DfHackError::Protocol(format!(
                "invalid message size {}",
                self.size
            )));
        }
        Ok(self.size as usize)
    }
}

/// Frame a request: header for `id` followed by the encoded message
pub fn encode_request<M: prost::Message>(id: i16, message: &M) -> Result<Vec<u8>> {
    let body = message.encode_to_vec();
    let size = i32::try_from(body.len())
        .ok()
        .filter(|size| *size <= MAX_MESSAGE_SIZE)
        .ok_or_else(|| {
            DfHackError::Protocol(format!("request too large: {} bytes", body.len()))
        })?;

    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(&RpcHeader::new(id, size).to_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

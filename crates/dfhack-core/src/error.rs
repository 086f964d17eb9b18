//! Error types for the DFHack facade

use std::fmt;
use thiserror::Error;

/// Result type for DFHack operations
pub type Result<T> = std::result::Result<T, DfHackError>;

/// DFHack facade error types
#[derive(Debug, Error)]
pub enum DfHackError {
    /// Game process unreachable at startup
    #[error("Failed to connect to DFHack at {address}: {reason}")]
    Connect { address: String, reason: String },

    /// Remote end did not answer the DFHack handshake
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// Channel I/O error
    #[error("IPC error: {0}")]
    Ipc(String),

    /// Framing or sequencing error on the channel
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The game answered a call with a failure reply
    #[error("{method} failed: {result}")]
    CommandFailed {
        method: String,
        result: CommandResult,
    },

    /// Reply decoded but its contents cannot be mapped
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Caller supplied bad input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DfHackError {
    /// Whether the caller, not the game or the channel, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, DfHackError::InvalidRequest(_))
    }

    /// Whether the failure came from the game process or the channel to it
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DfHackError::Connect { .. }
                | DfHackError::Handshake(_)
                | DfHackError::Ipc(_)
                | DfHackError::Protocol(_)
                | DfHackError::CommandFailed { .. }
                | DfHackError::MalformedResponse(_)
        )
    }

    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            DfHackError::InvalidRequest(_) => error_codes::INVALID_PARAMS,
            DfHackError::Connect { .. } | DfHackError::Handshake(_) | DfHackError::Ipc(_) => {
                error_codes::GAME_UNREACHABLE
            }
            DfHackError::CommandFailed { .. } => error_codes::COMMAND_FAILED,
            DfHackError::Protocol(_) | DfHackError::MalformedResponse(_) => {
                error_codes::MALFORMED_RESPONSE
            }
            DfHackError::Serialization(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<serde_json::Error> for DfHackError {
    fn from(err: serde_json::Error) -> Self {
        DfHackError::Serialization(err.to_string())
    }
}

impl From<prost::DecodeError> for DfHackError {
    fn from(err: prost::DecodeError) -> Self {
        DfHackError::MalformedResponse(err.to_string())
    }
}

/// DFHack `command_result` codes carried by failure replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    LinkFailure,
    NeedsConsole,
    NotImplemented,
    Ok,
    Failure,
    WrongUsage,
    NotFound,
    Unknown(i32),
}

impl CommandResult {
    /// Wire value
    pub fn as_i32(self) -> i32 {
        match self {
            CommandResult::LinkFailure => -3,
            CommandResult::NeedsConsole => -2,
            CommandResult::NotImplemented => -1,
            CommandResult::Ok => 0,
            CommandResult::Failure => 1,
            CommandResult::WrongUsage => 2,
            CommandResult::NotFound => 3,
            CommandResult::Unknown(code) => code,
        }
    }
}

impl From<i32> for CommandResult {
    fn from(code: i32) -> Self {
        match code {
            -3 => CommandResult::LinkFailure,
            -2 => CommandResult::NeedsConsole,
            -1 => CommandResult::NotImplemented,
            0 => CommandResult::Ok,
            1 => CommandResult::Failure,
            2 => CommandResult::WrongUsage,
            3 => CommandResult::NotFound,
            other => CommandResult::Unknown(other),
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::LinkFailure => f.write_str("CR_LINK_FAILURE"),
            CommandResult::NeedsConsole => f.write_str("CR_NEEDS_CONSOLE"),
            CommandResult::NotImplemented => f.write_str("CR_NOT_IMPLEMENTED"),
            CommandResult::Ok => f.write_str("CR_OK"),
            CommandResult::Failure => f.write_str("CR_FAILURE"),
            CommandResult::WrongUsage => f.write_str("CR_WRONG_USAGE"),
            CommandResult::NotFound => f.write_str("CR_NOT_FOUND"),
            CommandResult::Unknown(code) => write!(f, "unknown result {}", code),
        }
    }
}

/// JSON-RPC error codes used by the MCP adapter
pub mod error_codes {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const GAME_UNREACHABLE: i32 = -32000;
    pub const COMMAND_FAILED: i32 = -32001;
    pub const MALFORMED_RESPONSE: i32 = -32002;
}

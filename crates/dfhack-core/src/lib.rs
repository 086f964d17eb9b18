//! # dfhack-core
//!
//! Core types shared by the DFHack MCP facade.
//!
//! This crate provides:
//! - Protobuf message definitions for the subset of the DFHack remote API we call
//! - JSON response records returned by the HTTP routes and MCP tools
//! - Error types and command result codes

pub mod error;
pub mod proto;
pub mod responses;

pub use error::{CommandResult, DfHackError, Result, error_codes};
pub use responses::{
    DwarfModeDetails, ListUnitsRequest, ListUnitsResponse, NameRecord, Position, UnitDetail,
    UnitListResponse, UnitSummary, VersionsResponse, ViewInfoResponse, WorldDetails,
    WorldInfoResponse,
};

//! # dfhack-remote
//!
//! Client for the DFHack remote protocol over TCP.
//!
//! This crate provides:
//! - Handshake and message framing
//! - Lazy method binding per session
//! - `RemoteClient`, the `DfHackClient` used by the server binary

pub mod channel;
pub mod client;
pub mod frame;
pub mod methods;

pub use channel::Channel;
pub use client::{RemoteClient, RemoteConfig};
pub use methods::RemoteMethod;

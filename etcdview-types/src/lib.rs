//! Core type definitions for the etcdview admin console.
//!
//! This crate defines the data contracts shared by the gateway, the
//! synchronization layer and the HTTP surface:
//! - `Entry`: one key-value pair with its store-assigned revision metadata
//! - `ConnectionStatus`: what the console reports about the store endpoint
//! - value classification and formatting for opaque string payloads
//!
//! Everything here is plain data; all I/O lives in the gateway and server
//! crates.

mod entry;
mod value;

pub use entry::{ConnectionStatus, Entry};
pub use value::{ValueKind, classify_value, normalize_json};

//! # Ports Layer
//!
//! - `inbound.rs` - Driving ports (API exposed to block import and RPC)
//! - `outbound.rs` - Driven ports (store and chain data the index needs)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

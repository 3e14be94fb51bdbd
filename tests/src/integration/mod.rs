//! # Integration Flows
//!
//! - `lookup_flows` - mixed-format databases, resolver logging, bloom pruning
//! - `big_bits_flows` - chain weight arithmetic and the integrity monitor
//! - `runtime_flows` - import, reorg and abort through the node runtime

pub mod big_bits_flows;
pub mod lookup_flows;
pub mod runtime_flows;

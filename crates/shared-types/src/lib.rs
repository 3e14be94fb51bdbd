//! # Shared Types Crate
//!
//! Entities exchanged between the index crates and the node runtime.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `Transaction` and `BlockBody` are
//!   defined once and used by every crate in the workspace.
//! - **One Signal Channel**: background tasks and the runtime agree on
//!   [`ShutdownSignal`] as the only value carried on the shutdown channel.

pub mod entities;
pub mod signal;

pub use entities::*;
pub use signal::ShutdownSignal;

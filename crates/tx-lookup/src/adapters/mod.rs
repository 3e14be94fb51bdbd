//! # Adapters Layer
//!
//! - `memory.rs` - In-memory store and a fault-injecting wrapper
//! - `chain.rs` - Chain accessors over the key-value store
//! - `rocksdb.rs` - RocksDB store (feature `rocksdb`)

pub mod chain;
pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;

pub use chain::ChainStore;
pub use memory::{FaultInjectingStore, InMemoryKVStore};
#[cfg(feature = "rocksdb")]
pub use self::rocksdb::{RocksDbConfig, RocksDbStore};

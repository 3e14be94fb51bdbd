//! # Transaction Lookup Index
//!
//! Maps transaction hashes and bloom-bit section coordinates to byte keys in
//! an ordered key-value store, and resolves a transaction hash back to the
//! transaction, its block and its position.
//!
//! ## Entry Formats
//!
//! Lookup values carry no version tag. Three generations coexist on disk and
//! are told apart purely by length (see [`domain::codec`]):
//!
//! ```text
//! len 0       -> absent
//! len 1..31   -> block number (v6+, the only format written)
//! len 32      -> block hash   (v4-v5, resolved via header-number index)
//! len > 32    -> protobuf     (v3, LegacyTxLookupEntry)
//! ```
//!
//! ## Error Surface
//!
//! | Condition | Result | Logged |
//! |-----------|--------|--------|
//! | Absent entry / canonical hash | `None` | no |
//! | Malformed v3 record | `None` | error |
//! | Missing block body | `None` | error |
//! | Transaction absent from body | `None` | error |
//! | Store write/delete/iterator failure | `Err(Unrecoverable)` | error |
//!
//! `Unrecoverable` is never retried. The node runtime converts it into an
//! orderly process abort.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): key layouts, codec, errors. No I/O.
//! - **Ports Layer** (`ports/`): `TransactionLookupApi`, `KeyValueStore`, `ChainReader`
//! - **Service Layer** (`service/`): index, resolver, bloom sections
//! - **Adapters Layer** (`adapters/`): in-memory store, RocksDB, chain store

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ChainStore, FaultInjectingStore, InMemoryKVStore};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use domain::{
    bloom_bits_key, bloom_bits_prefix, classify, encode_block_number, tx_lookup_key, IndexStats,
    IndexStatsSnapshot, KVStoreError, LegacyTxLookupEntry, RawLookupEntry, ResolvedTransaction,
    StoreOperation, Unrecoverable, BLOOM_BITS_KEY_LENGTH, TX_LOOKUP_KEY_LENGTH,
};
pub use ports::{ChainReader, KeyValueStore, KvIterator, TransactionLookupApi};
pub use service::{BloomSectionStore, TransactionIndex, TransactionResolver, TxLookupService};

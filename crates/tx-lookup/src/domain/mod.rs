//! # Domain Layer
//!
//! Key layouts, the versioned entry codec and the error/value types. Nothing
//! here touches a store; all I/O goes through the ports in `ports`.

pub mod codec;
pub mod errors;
pub mod keys;
pub mod legacy;
pub mod value_objects;

pub use codec::{classify, encode_block_number, resolve, RawLookupEntry};
pub use errors::{KVStoreError, StoreOperation, Unrecoverable};
pub use keys::*;
pub use legacy::LegacyTxLookupEntry;
pub use value_objects::{IndexStats, IndexStatsSnapshot, ResolvedTransaction};

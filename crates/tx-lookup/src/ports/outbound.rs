//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the index requires the host to provide.
//!
//! - [`KeyValueStore`]: ordered byte-keyed store. Production:
//!   `RocksDbStore` (feature `rocksdb`). Testing: `InMemoryKVStore`.
//! - [`ChainReader`]: canonical hashes, header numbers and block bodies.
//!   Default: `ChainStore`, which reads them from the same key-value store.

use std::sync::Arc;

use shared_types::{BlockBody, BlockNumber, Hash};

use crate::domain::errors::KVStoreError;

/// Abstract interface for an ordered key-value database.
///
/// All methods take `&self`: implementations are shared between threads and
/// do their own synchronisation. The index adds no locking and makes no
/// atomicity promise across keys.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Iterate, in ascending byte order, over the keys that start with
    /// `prefix`, beginning at `prefix ++ start`.
    ///
    /// The iterator is released when dropped.
    fn new_iterator<'a>(&'a self, prefix: &[u8], start: &[u8]) -> Box<dyn KvIterator + 'a>;

    /// Check if a key exists.
    fn has(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        (**self).delete(key)
    }

    fn new_iterator<'a>(&'a self, prefix: &[u8], start: &[u8]) -> Box<dyn KvIterator + 'a> {
        (**self).new_iterator(prefix, start)
    }
}

/// Forward cursor over a key range.
///
/// Positioned before the first entry on creation. Single-threaded; not meant
/// to be shared.
pub trait KvIterator {
    /// Advance to the next entry. Returns `false` when exhausted or on error.
    fn next(&mut self) -> bool;

    /// Key at the current position. Empty when not positioned.
    fn key(&self) -> &[u8];

    /// Value at the current position. Empty when not positioned.
    fn value(&self) -> &[u8];

    /// Error that ended iteration early, if any.
    fn error(&self) -> Option<KVStoreError>;
}

/// Read access to chain data the resolver needs.
pub trait ChainReader: Send + Sync {
    /// Hash of the canonical block at `number`.
    fn canonical_hash(&self, number: BlockNumber) -> Option<Hash>;

    /// Height of the block with `hash`.
    fn header_number(&self, hash: &Hash) -> Option<BlockNumber>;

    /// Body of block `(number, hash)`.
    fn block_body(&self, number: BlockNumber, hash: &Hash) -> Option<BlockBody>;
}

impl<C: ChainReader + ?Sized> ChainReader for Arc<C> {
    fn canonical_hash(&self, number: BlockNumber) -> Option<Hash> {
        (**self).canonical_hash(number)
    }

    fn header_number(&self, hash: &Hash) -> Option<BlockNumber> {
        (**self).header_number(hash)
    }

    fn block_body(&self, number: BlockNumber, hash: &Hash) -> Option<BlockBody> {
        (**self).block_body(number, hash)
    }
}

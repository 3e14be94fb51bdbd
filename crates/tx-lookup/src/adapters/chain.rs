//! Chain accessors over the shared key-value store.
//!
//! Canonical hashes, header numbers and block bodies live next to the lookup
//! entries under their own prefixes (see `domain::keys`). Bodies are
//! bincode-encoded.

use std::sync::Arc;

use shared_types::{BlockBody, BlockNumber, Hash, HASH_LENGTH, ZERO_HASH};
use tracing::error;

use crate::domain::errors::{KVStoreError, StoreOperation, Unrecoverable};
use crate::domain::keys::{block_body_key, canonical_hash_key, header_number_key};
use crate::ports::outbound::{ChainReader, KeyValueStore};

/// Reads and writes chain data in a [`KeyValueStore`].
pub struct ChainStore<S> {
    store: Arc<S>,
}

impl<S> Clone for ChainStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> ChainStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Mark `hash` as the canonical block at `number`.
    pub fn write_canonical_hash(
        &self,
        number: BlockNumber,
        hash: &Hash,
    ) -> Result<(), Unrecoverable> {
        self.store
            .put(&canonical_hash_key(number), hash)
            .map_err(|e| Unrecoverable::reported(StoreOperation::WriteCanonicalHash, e))
    }

    pub fn delete_canonical_hash(&self, number: BlockNumber) -> Result<(), Unrecoverable> {
        self.store
            .delete(&canonical_hash_key(number))
            .map_err(|e| Unrecoverable::reported(StoreOperation::DeleteCanonicalHash, e))
    }

    /// Record the height of the block with `hash`.
    pub fn write_header_number(
        &self,
        hash: &Hash,
        number: BlockNumber,
    ) -> Result<(), Unrecoverable> {
        self.store
            .put(&header_number_key(hash), &number.to_be_bytes())
            .map_err(|e| Unrecoverable::reported(StoreOperation::WriteHeaderNumber, e))
    }

    pub fn delete_header_number(&self, hash: &Hash) -> Result<(), Unrecoverable> {
        self.store
            .delete(&header_number_key(hash))
            .map_err(|e| Unrecoverable::reported(StoreOperation::DeleteHeaderNumber, e))
    }

    pub fn write_block_body(
        &self,
        number: BlockNumber,
        hash: &Hash,
        body: &BlockBody,
    ) -> Result<(), Unrecoverable> {
        let data = bincode::serialize(body).map_err(|e| {
            Unrecoverable::reported(
                StoreOperation::WriteBlockBody,
                KVStoreError::CorruptionError {
                    message: e.to_string(),
                },
            )
        })?;
        self.store
            .put(&block_body_key(number, hash), &data)
            .map_err(|e| Unrecoverable::reported(StoreOperation::WriteBlockBody, e))
    }

    pub fn delete_block_body(&self, number: BlockNumber, hash: &Hash) -> Result<(), Unrecoverable> {
        self.store
            .delete(&block_body_key(number, hash))
            .map_err(|e| Unrecoverable::reported(StoreOperation::DeleteBlockBody, e))
    }
}

impl<S: KeyValueStore> ChainReader for ChainStore<S> {
    fn canonical_hash(&self, number: BlockNumber) -> Option<Hash> {
        let data = self.store.get(&canonical_hash_key(number)).ok().flatten()?;
        if data.len() != HASH_LENGTH {
            return None;
        }
        let mut hash = ZERO_HASH;
        hash.copy_from_slice(&data);
        (hash != ZERO_HASH).then_some(hash)
    }

    fn header_number(&self, hash: &Hash) -> Option<BlockNumber> {
        let data = self.store.get(&header_number_key(hash)).ok().flatten()?;
        let bytes: [u8; 8] = data.as_slice().try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    fn block_body(&self, number: BlockNumber, hash: &Hash) -> Option<BlockBody> {
        let data = self.store.get(&block_body_key(number, hash)).ok().flatten()?;
        match bincode::deserialize(&data) {
            Ok(body) => Some(body),
            Err(err) => {
                error!(number, hash = %hex::encode(hash), error = %err, "Invalid block body");
                None
            }
        }
    }
}

//! Compressed bloom-bit sections.

use std::sync::Arc;

use shared_types::{Hash, ZERO_HASH};
use tracing::debug;

use crate::domain::errors::{StoreOperation, Unrecoverable};
use crate::domain::keys::{bloom_bits_key, bloom_bits_prefix, BLOOM_BITS_KEY_LENGTH};
use crate::ports::outbound::KeyValueStore;

/// Per-bit, per-section bloom storage keyed by `(bit, section, head)`.
pub struct BloomSectionStore<S> {
    store: Arc<S>,
}

impl<S> Clone for BloomSectionStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> BloomSectionStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Bits of one section. Store read errors count as absent.
    pub fn read(&self, bit: u16, section: u64, head: &Hash) -> Option<Vec<u8>> {
        self.store
            .get(&bloom_bits_key(bit, section, head))
            .ok()
            .flatten()
    }

    pub fn write(
        &self,
        bit: u16,
        section: u64,
        head: &Hash,
        bits: &[u8],
    ) -> Result<(), Unrecoverable> {
        self.store
            .put(&bloom_bits_key(bit, section, head), bits)
            .map_err(|e| Unrecoverable::reported(StoreOperation::WriteBloomBits, e))
    }

    /// Delete every stored head of sections `[from, to)` for `bit`.
    ///
    /// The scan is confined to the `B ++ bit` prefix. Keys inside the range
    /// whose length is not a bloom key's are skipped. Returns the number of
    /// keys removed.
    pub fn delete_range(&self, bit: u16, from: u64, to: u64) -> Result<usize, Unrecoverable> {
        let prefix = bloom_bits_prefix(bit);
        let end = bloom_bits_key(bit, to, &ZERO_HASH);
        let mut seek = from.to_be_bytes().to_vec();
        seek.extend_from_slice(&ZERO_HASH);

        let mut it = self.store.new_iterator(&prefix, &seek);
        let mut deleted = 0;
        while it.next() {
            let key = it.key();
            if key >= end.as_slice() {
                break;
            }
            if key.len() != BLOOM_BITS_KEY_LENGTH {
                continue;
            }
            self.store
                .delete(key)
                .map_err(|e| Unrecoverable::reported(StoreOperation::DeleteBloomBits, e))?;
            deleted += 1;
        }
        if let Some(err) = it.error() {
            return Err(Unrecoverable::reported(StoreOperation::DeleteBloomBits, err));
        }

        debug!(bit, from, to, deleted, "Deleted bloom bit sections");
        Ok(deleted)
    }
}

//! Transaction hash to block number index.

use std::sync::Arc;

use shared_types::{BlockBody, BlockNumber, Hash};
use tracing::{debug, error};

use crate::domain::codec::{classify, encode_block_number, resolve, RawLookupEntry};
use crate::domain::errors::{StoreOperation, Unrecoverable};
use crate::domain::keys::tx_lookup_key;
use crate::domain::value_objects::{IndexStats, IndexStatsSnapshot};
use crate::ports::outbound::{ChainReader, KeyValueStore};

/// Reads any historical entry format, writes only the current one.
pub struct TransactionIndex<S, C> {
    store: Arc<S>,
    chain: Arc<C>,
    stats: Arc<IndexStats>,
}

impl<S, C> Clone for TransactionIndex<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            chain: Arc::clone(&self.chain),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<S: KeyValueStore, C: ChainReader> TransactionIndex<S, C> {
    pub fn new(store: Arc<S>, chain: Arc<C>) -> Self {
        Self {
            store,
            chain,
            stats: Arc::new(IndexStats::default()),
        }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub(crate) fn stats_handle(&self) -> &IndexStats {
        &self.stats
    }

    pub fn stats(&self) -> IndexStatsSnapshot {
        self.stats.snapshot()
    }

    /// Block number recorded for `hash`.
    ///
    /// Absent entries, unknown v4-v5 hashes, store read errors and corrupt v3
    /// records all yield `None`. Only the last is logged.
    pub fn read(&self, hash: &Hash) -> Option<BlockNumber> {
        let data = match self.store.get(&tx_lookup_key(hash)) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(err) => {
                debug!(hash = %hex::encode(hash), error = %err, "Lookup entry read failed");
                return None;
            }
        };

        match classify(&data) {
            RawLookupEntry::Malformed(err) => {
                self.stats.record_malformed_entry();
                error!(
                    hash = %hex::encode(hash),
                    blob = %hex::encode(&data),
                    error = %err,
                    "Invalid transaction lookup entry protobuf"
                );
                None
            }
            entry => resolve(entry, |block_hash| self.chain.header_number(block_hash)),
        }
    }

    /// Store a raw lookup value for `hash`.
    ///
    /// `number_bytes` is written verbatim. Use [`encode_block_number`] to
    /// produce it.
    pub fn write(&self, hash: &Hash, number_bytes: &[u8]) -> Result<(), Unrecoverable> {
        self.store
            .put(&tx_lookup_key(hash), number_bytes)
            .map_err(|e| Unrecoverable::reported(StoreOperation::WriteTxLookup, e))
    }

    /// Point every hash at block `number`. Stops at the first failure;
    /// entries already written stay written.
    pub fn write_batch_for_block(
        &self,
        number: BlockNumber,
        hashes: &[Hash],
    ) -> Result<(), Unrecoverable> {
        let encoded = encode_block_number(number);
        for hash in hashes {
            self.write(hash, &encoded)?;
        }
        Ok(())
    }

    /// Index every transaction in `body` under block `number`.
    pub fn write_for_block(
        &self,
        number: BlockNumber,
        body: &BlockBody,
    ) -> Result<(), Unrecoverable> {
        self.write_batch_for_block(number, &body.transaction_hashes())
    }

    pub fn delete(&self, hash: &Hash) -> Result<(), Unrecoverable> {
        self.store
            .delete(&tx_lookup_key(hash))
            .map_err(|e| Unrecoverable::reported(StoreOperation::DeleteTxLookup, e))
    }

    pub fn delete_batch(&self, hashes: &[Hash]) -> Result<(), Unrecoverable> {
        hashes.iter().try_for_each(|hash| self.delete(hash))
    }
}

//! Full transaction resolution: lookup entry, canonical hash, block body.

use shared_types::Hash;
use tracing::error;

use crate::domain::value_objects::ResolvedTransaction;
use crate::ports::outbound::{ChainReader, KeyValueStore};

use super::index::TransactionIndex;

/// Resolves a transaction hash to the transaction and its position.
pub struct TransactionResolver<S, C> {
    index: TransactionIndex<S, C>,
}

impl<S: KeyValueStore, C: ChainReader> TransactionResolver<S, C> {
    pub fn new(index: TransactionIndex<S, C>) -> Self {
        Self { index }
    }

    /// Locate `hash` in the canonical chain.
    ///
    /// A missing lookup entry or canonical hash is an ordinary miss. A missing
    /// body, or a body that no longer contains the transaction, is logged as
    /// an error since the index and the chain disagree.
    pub fn resolve(&self, hash: &Hash) -> Option<ResolvedTransaction> {
        let block_number = self.index.read(hash)?;
        let chain = self.index.chain();
        let block_hash = chain.canonical_hash(block_number)?;

        let Some(body) = chain.block_body(block_number, &block_hash) else {
            self.index.stats_handle().record_missing_body();
            error!(
                number = block_number,
                hash = %hex::encode(block_hash),
                "Transaction referenced missing block"
            );
            return None;
        };

        let found = body
            .transactions
            .into_iter()
            .enumerate()
            .find(|(_, tx)| tx.hash() == *hash);

        match found {
            Some((position, transaction)) => Some(ResolvedTransaction {
                transaction,
                block_hash,
                block_number,
                tx_index: position as u64,
            }),
            None => {
                self.index.stats_handle().record_stale_entry();
                error!(
                    number = block_number,
                    hash = %hex::encode(block_hash),
                    txhash = %hex::encode(hash),
                    "Transaction not found"
                );
                None
            }
        }
    }
}

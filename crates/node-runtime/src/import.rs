//! # Block Importer
//!
//! Writes a block's chain data and lookup entries, and removes them again on
//! rollback.
//!
//! ## Write Order
//!
//! ```text
//! import:   body -> header number -> canonical hash -> lookup entries
//! rollback: lookup entries -> canonical hash -> header number -> body
//! ```
//!
//! A reader never sees a canonical hash whose body has not been written yet.
//! Every step can fail with [`Unrecoverable`]; nothing is retried and a
//! partial import is left in place for the operator.

use std::sync::Arc;

use shared_types::{BlockBody, BlockNumber, Hash};
use tracing::{debug, info};
use tx_lookup::{
    ChainReader, ChainStore, KeyValueStore, TransactionLookupApi, TxLookupService, Unrecoverable,
};

/// Lookup service type used by the importer.
pub type LookupService<S> = TxLookupService<S, ChainStore<S>>;

/// Feeds blocks into the chain store and the lookup index.
pub struct BlockImporter<S> {
    chain: Arc<ChainStore<S>>,
    lookup: Arc<LookupService<S>>,
}

impl<S> Clone for BlockImporter<S> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<S: KeyValueStore> BlockImporter<S> {
    pub fn new(store: Arc<S>) -> Self {
        let chain = Arc::new(ChainStore::new(Arc::clone(&store)));
        let lookup = Arc::new(TxLookupService::new(store, Arc::clone(&chain)));
        Self { chain, lookup }
    }

    pub fn chain(&self) -> &ChainStore<S> {
        &self.chain
    }

    pub fn lookup(&self) -> &LookupService<S> {
        &self.lookup
    }

    /// Make `(number, hash)` canonical and index its transactions.
    pub fn import(
        &self,
        number: BlockNumber,
        hash: &Hash,
        body: &BlockBody,
    ) -> Result<(), Unrecoverable> {
        self.chain.write_block_body(number, hash, body)?;
        self.chain.write_header_number(hash, number)?;
        self.chain.write_canonical_hash(number, hash)?;
        self.lookup.index_block(number, body)?;

        info!(
            number,
            hash = %hex::encode(hash),
            txs = body.transactions.len(),
            "Imported block"
        );
        Ok(())
    }

    /// Undo [`Self::import`].
    ///
    /// Lookup entries are removed for every transaction of the stored body.
    /// The canonical mapping is only removed if it still points at `hash`.
    pub fn rollback(&self, number: BlockNumber, hash: &Hash) -> Result<(), Unrecoverable> {
        let hashes = self
            .chain
            .block_body(number, hash)
            .map(|body| body.transaction_hashes())
            .unwrap_or_default();
        self.lookup.unindex_hashes(&hashes)?;

        if self.chain.canonical_hash(number) == Some(*hash) {
            self.chain.delete_canonical_hash(number)?;
        } else {
            debug!(number, hash = %hex::encode(hash), "Rolled back block was not canonical");
        }
        self.chain.delete_header_number(hash)?;
        self.chain.delete_block_body(number, hash)?;

        info!(
            number,
            hash = %hex::encode(hash),
            txs = hashes.len(),
            "Rolled back block"
        );
        Ok(())
    }
}

//! # Transaction Lookup Service
//!
//! Wires the index, resolver and bloom store over one key-value store and
//! exposes them through [`TransactionLookupApi`].

pub mod bloom;
pub mod index;
pub mod resolver;

use std::sync::Arc;

use shared_types::{BlockBody, BlockNumber, Hash};

use crate::domain::{IndexStatsSnapshot, ResolvedTransaction, Unrecoverable};
use crate::ports::inbound::TransactionLookupApi;
use crate::ports::outbound::{ChainReader, KeyValueStore};

pub use bloom::BloomSectionStore;
pub use index::TransactionIndex;
pub use resolver::TransactionResolver;

/// The positional index service.
pub struct TxLookupService<S, C> {
    index: TransactionIndex<S, C>,
    resolver: TransactionResolver<S, C>,
    blooms: BloomSectionStore<S>,
}

impl<S: KeyValueStore, C: ChainReader> TxLookupService<S, C> {
    pub fn new(store: Arc<S>, chain: Arc<C>) -> Self {
        let index = TransactionIndex::new(Arc::clone(&store), chain);
        Self {
            resolver: TransactionResolver::new(index.clone()),
            blooms: BloomSectionStore::new(store),
            index,
        }
    }

    pub fn index(&self) -> &TransactionIndex<S, C> {
        &self.index
    }

    pub fn blooms(&self) -> &BloomSectionStore<S> {
        &self.blooms
    }
}

impl<S: KeyValueStore, C: ChainReader> TransactionLookupApi for TxLookupService<S, C> {
    fn lookup_block_number(&self, tx_hash: &Hash) -> Option<BlockNumber> {
        self.index.read(tx_hash)
    }

    fn resolve_transaction(&self, tx_hash: &Hash) -> Option<ResolvedTransaction> {
        self.resolver.resolve(tx_hash)
    }

    fn index_block(&self, number: BlockNumber, body: &BlockBody) -> Result<(), Unrecoverable> {
        self.index.write_for_block(number, body)
    }

    fn index_hashes(&self, number: BlockNumber, hashes: &[Hash]) -> Result<(), Unrecoverable> {
        self.index.write_batch_for_block(number, hashes)
    }

    fn unindex_hashes(&self, hashes: &[Hash]) -> Result<(), Unrecoverable> {
        self.index.delete_batch(hashes)
    }

    fn bloom_bits(&self, bit: u16, section: u64, head: &Hash) -> Option<Vec<u8>> {
        self.blooms.read(bit, section, head)
    }

    fn store_bloom_bits(
        &self,
        bit: u16,
        section: u64,
        head: &Hash,
        bits: &[u8],
    ) -> Result<(), Unrecoverable> {
        self.blooms.write(bit, section, head, bits)
    }

    fn prune_bloom_bits(&self, bit: u16, from: u64, to: u64) -> Result<usize, Unrecoverable> {
        self.blooms.delete_range(bit, from, to)
    }

    fn stats(&self) -> IndexStatsSnapshot {
        self.index.stats()
    }
}

//! # Inbound Ports (Driving Ports)
//!
//! The API block import, rollback and RPC code drive the index through.

use shared_types::{BlockBody, BlockNumber, Hash};

use crate::domain::{IndexStatsSnapshot, ResolvedTransaction, Unrecoverable};

/// Primary API of the positional index.
///
/// Reads return `None` for every kind of miss: absent, stale, or corrupt
/// entries are indistinguishable to the caller and only differ in what gets
/// logged. Writes fail only with [`Unrecoverable`].
pub trait TransactionLookupApi {
    /// Block number recorded for a transaction.
    fn lookup_block_number(&self, tx_hash: &Hash) -> Option<BlockNumber>;

    /// Full transaction plus its position in the canonical chain.
    fn resolve_transaction(&self, tx_hash: &Hash) -> Option<ResolvedTransaction>;

    /// Index every transaction of a block body.
    fn index_block(&self, number: BlockNumber, body: &BlockBody) -> Result<(), Unrecoverable>;

    /// Index an explicit set of transaction hashes.
    fn index_hashes(&self, number: BlockNumber, hashes: &[Hash]) -> Result<(), Unrecoverable>;

    /// Drop lookup entries, e.g. on reorg.
    fn unindex_hashes(&self, hashes: &[Hash]) -> Result<(), Unrecoverable>;

    /// Compressed bloom bits of one section.
    fn bloom_bits(&self, bit: u16, section: u64, head: &Hash) -> Option<Vec<u8>>;

    /// Store the compressed bloom bits of one section.
    fn store_bloom_bits(
        &self,
        bit: u16,
        section: u64,
        head: &Hash,
        bits: &[u8],
    ) -> Result<(), Unrecoverable>;

    /// Delete the bloom bits of sections `[from, to)` of one bit.
    fn prune_bloom_bits(&self, bit: u16, from: u64, to: u64) -> Result<usize, Unrecoverable>;

    /// Counters for log-only conditions.
    fn stats(&self) -> IndexStatsSnapshot;
}

//! # Value Objects
//!
//! Results returned by the index and the counters it keeps.

use std::sync::atomic::{AtomicU64, Ordering};

use shared_types::{BlockNumber, Hash, Transaction};

/// A transaction located through the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTransaction {
    /// The transaction as stored in the block body.
    pub transaction: Transaction,
    /// Canonical hash of the containing block.
    pub block_hash: Hash,
    /// Height of the containing block.
    pub block_number: BlockNumber,
    /// Position inside the block body.
    pub tx_index: u64,
}

/// Counters for the conditions that are only otherwise visible in logs.
#[derive(Debug, Default)]
pub struct IndexStats {
    malformed_entries: AtomicU64,
    missing_bodies: AtomicU64,
    stale_entries: AtomicU64,
}

impl IndexStats {
    pub(crate) fn record_malformed_entry(&self) {
        self.malformed_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_missing_body(&self) {
        self.missing_bodies.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale_entry(&self) {
        self.stale_entries.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> IndexStatsSnapshot {
        IndexStatsSnapshot {
            malformed_entries: self.malformed_entries.load(Ordering::Relaxed),
            missing_bodies: self.missing_bodies.load(Ordering::Relaxed),
            stale_entries: self.stale_entries.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`IndexStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStatsSnapshot {
    /// v3 records that failed to decode.
    pub malformed_entries: u64,
    /// Entries pointing at a block whose body is gone.
    pub missing_bodies: u64,
    /// Entries whose block body no longer contains the transaction.
    pub stale_entries: u64,
}

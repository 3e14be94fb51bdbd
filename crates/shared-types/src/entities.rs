//! # Core Domain Entities
//!
//! The chain data the positional index points into. Bodies are owned by the
//! block store; the index only ever refers to them by `(number, hash)`.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// A 32-byte hash (block hash, transaction hash, section head).
pub type Hash = [u8; 32];

/// Length of a [`Hash`] in bytes.
pub const HASH_LENGTH: usize = 32;

/// The all-zero hash. Used as "absent" by canonical-hash lookups and as the
/// lower bound of bloom section range scans.
pub const ZERO_HASH: Hash = [0u8; HASH_LENGTH];

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Height of a block in the chain.
pub type BlockNumber = u64;

/// A transaction as stored inside a block body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transaction {
    /// Sender's nonce.
    pub nonce: u64,
    /// Sender address.
    pub from: Address,
    /// Recipient address (`None` for contract creation).
    pub to: Option<Address>,
    /// Amount in base units.
    pub value: u64,
    /// Call data.
    pub data: Vec<u8>,
}

impl Transaction {
    /// Keccak-256 over the canonical field layout:
    /// `nonce(8 BE) || from || to_flag || to? || value(8 BE) || len(data)(8 BE) || data`.
    pub fn hash(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(self.from);
        match &self.to {
            Some(to) => {
                hasher.update([1u8]);
                hasher.update(to);
            }
            None => hasher.update([0u8]),
        }
        hasher.update(self.value.to_be_bytes());
        hasher.update((self.data.len() as u64).to_be_bytes());
        hasher.update(&self.data);
        hasher.finalize().into()
    }
}

/// The body of a block: its ordered transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockBody {
    /// Transactions in canonical order. A transaction's position in this
    /// vector is its `tx_index`.
    pub transactions: Vec<Transaction>,
}

impl BlockBody {
    /// Create a body from an ordered list of transactions.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Hashes of every transaction, in body order.
    pub fn transaction_hashes(&self) -> Vec<Hash> {
        self.transactions.iter().map(Transaction::hash).collect()
    }
}

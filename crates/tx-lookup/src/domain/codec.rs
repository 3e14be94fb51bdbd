//! # Versioned Lookup Codec
//!
//! A lookup entry carries no version tag. Three formats exist on disk and are
//! told apart by length alone:
//!
//! | Length | Format | Content |
//! |--------|--------|---------|
//! | 0 | - | absent |
//! | 1..32 | v6+ | block number, big-endian, leading zeros trimmed |
//! | 32 | v4-v5 | block hash, number resolved via the header-number index |
//! | > 32 | v3 | protobuf [`LegacyTxLookupEntry`] |
//!
//! A v3 record whose protobuf happens to be shorter than 32 bytes would be
//! misread as v6+. That ambiguity is inherited from the formats and cannot be
//! resolved without breaking existing databases.
//!
//! Only the v6+ format is ever written.

use shared_types::{BlockNumber, Hash, HASH_LENGTH};

use super::legacy::LegacyTxLookupEntry;

/// A raw lookup entry after length-based classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawLookupEntry {
    /// No value stored.
    Empty,
    /// v6+: the number itself.
    BlockNumber(BlockNumber),
    /// v4-v5: the containing block's hash.
    BlockHash(Hash),
    /// v3: decoded protobuf record.
    Legacy(BlockNumber),
    /// v3 blob that failed to decode.
    Malformed(prost::DecodeError),
}

/// Classify a stored value. Pure: never touches the store and never logs.
pub fn classify(raw: &[u8]) -> RawLookupEntry {
    match raw.len() {
        0 => RawLookupEntry::Empty,
        len if len < HASH_LENGTH => RawLookupEntry::BlockNumber(be_bytes_to_u64(raw)),
        HASH_LENGTH => {
            let mut hash = [0u8; HASH_LENGTH];
            hash.copy_from_slice(raw);
            RawLookupEntry::BlockHash(hash)
        }
        _ => match LegacyTxLookupEntry::decode_blob(raw) {
            Ok(entry) => RawLookupEntry::Legacy(entry.block_index),
            Err(err) => RawLookupEntry::Malformed(err),
        },
    }
}

/// Resolve a classified entry to a block number.
///
/// `header_number` is consulted only for v4-v5 entries.
pub fn resolve(
    entry: RawLookupEntry,
    header_number: impl FnOnce(&Hash) -> Option<BlockNumber>,
) -> Option<BlockNumber> {
    match entry {
        RawLookupEntry::Empty | RawLookupEntry::Malformed(_) => None,
        RawLookupEntry::BlockNumber(number) | RawLookupEntry::Legacy(number) => Some(number),
        RawLookupEntry::BlockHash(hash) => header_number(&hash),
    }
}

/// Encode a block number in the current (v6+) format: minimal big-endian.
///
/// Block 0 is written as a single zero byte so it never collides with the
/// empty value.
pub fn encode_block_number(number: BlockNumber) -> Vec<u8> {
    let bytes = number.to_be_bytes();
    let first = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[first..].to_vec()
}

/// Big-endian bytes to `u64`, keeping the low 64 bits of longer inputs.
fn be_bytes_to_u64(bytes: &[u8]) -> u64 {
    let tail = &bytes[bytes.len().saturating_sub(8)..];
    tail.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

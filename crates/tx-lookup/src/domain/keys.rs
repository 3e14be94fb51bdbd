//! # Key Schema
//!
//! Byte layout of every key the index reads or writes. These layouts are the
//! only bit-exact surface of the crate: changing one orphans persisted data.
//!
//! | Prefix | Key | Value |
//! |--------|-----|-------|
//! | `l` | `l ++ tx_hash` | lookup entry (see `codec`) |
//! | `B` | `B ++ bit(u16 BE) ++ section(u64 BE) ++ head` | compressed bloom bits |
//! | `H` | `H ++ block_hash` | block number (u64 BE) |
//! | `h` | `h ++ number(u64 BE) ++ n` | canonical block hash |
//! | `b` | `b ++ number(u64 BE) ++ block_hash` | encoded block body |

use shared_types::{BlockNumber, Hash, HASH_LENGTH};

/// Prefix of transaction lookup entries.
pub const TX_LOOKUP_PREFIX: &[u8] = b"l";
/// Prefix of bloom section bit vectors.
pub const BLOOM_BITS_PREFIX: &[u8] = b"B";
/// Prefix of block hash -> number entries.
pub const HEADER_NUMBER_PREFIX: &[u8] = b"H";
/// Prefix of canonical number -> hash entries.
pub const HEADER_PREFIX: &[u8] = b"h";
/// Suffix that turns a header key into a canonical hash key.
pub const HEADER_HASH_SUFFIX: &[u8] = b"n";
/// Prefix of block bodies.
pub const BLOCK_BODY_PREFIX: &[u8] = b"b";

/// Length of a transaction lookup key.
pub const TX_LOOKUP_KEY_LENGTH: usize = TX_LOOKUP_PREFIX.len() + HASH_LENGTH;

/// Length of every well-formed bloom bits key. Range scans skip keys of any
/// other length.
pub const BLOOM_BITS_KEY_LENGTH: usize = BLOOM_BITS_PREFIX.len() + 2 + 8 + HASH_LENGTH;

/// `l ++ hash`
pub fn tx_lookup_key(hash: &Hash) -> Vec<u8> {
    let mut key = Vec::with_capacity(TX_LOOKUP_KEY_LENGTH);
    key.extend_from_slice(TX_LOOKUP_PREFIX);
    key.extend_from_slice(hash);
    key
}

/// `B ++ bit(u16 BE) ++ section(u64 BE) ++ head`
///
/// Bit before section, both big-endian: all sections of one bit are
/// contiguous and ascending under byte order.
pub fn bloom_bits_key(bit: u16, section: u64, head: &Hash) -> Vec<u8> {
    let mut key = Vec::with_capacity(BLOOM_BITS_KEY_LENGTH);
    key.extend_from_slice(BLOOM_BITS_PREFIX);
    key.extend_from_slice(&bit.to_be_bytes());
    key.extend_from_slice(&section.to_be_bytes());
    key.extend_from_slice(head);
    key
}

/// `B ++ bit(u16 BE)`: the shared prefix of every section of `bit`.
pub fn bloom_bits_prefix(bit: u16) -> Vec<u8> {
    [BLOOM_BITS_PREFIX, &bit.to_be_bytes()[..]].concat()
}

/// `H ++ hash`
pub fn header_number_key(hash: &Hash) -> Vec<u8> {
    [HEADER_NUMBER_PREFIX, hash.as_slice()].concat()
}

/// `h ++ number(u64 BE) ++ n`
pub fn canonical_hash_key(number: BlockNumber) -> Vec<u8> {
    [
        HEADER_PREFIX,
        number.to_be_bytes().as_slice(),
        HEADER_HASH_SUFFIX,
    ]
    .concat()
}

/// `b ++ number(u64 BE) ++ hash`
pub fn block_body_key(number: BlockNumber, hash: &Hash) -> Vec<u8> {
    [
        BLOCK_BODY_PREFIX,
        number.to_be_bytes().as_slice(),
        hash.as_slice(),
    ]
    .concat()
}

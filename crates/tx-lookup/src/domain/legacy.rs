//! Database v3 lookup record.
//!
//! Before v4 a lookup entry was a protobuf message. Only the block index is
//! still meaningful; the index never writes this format.

use prost::Message;

/// Wire form of a v3 lookup entry.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LegacyTxLookupEntry {
    #[prost(uint64, tag = "1")]
    pub block_index: u64,
}

impl LegacyTxLookupEntry {
    /// Decode a stored blob.
    pub fn decode_blob(blob: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(blob)
    }

    /// Encode to protobuf bytes. Used by migration tooling and tests that
    /// need pre-v4 fixtures.
    pub fn encode_blob(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

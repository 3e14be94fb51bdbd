//! # Domain Errors
//!
//! Lookups never fail: a missing, stale or corrupt entry is reported as
//! `None` and the cause goes to the log. Only storage failures surface as
//! errors, and every one of them is [`Unrecoverable`].

use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Storage operation the index was performing when the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    WriteTxLookup,
    DeleteTxLookup,
    WriteBloomBits,
    DeleteBloomBits,
    WriteCanonicalHash,
    WriteHeaderNumber,
    WriteBlockBody,
    DeleteCanonicalHash,
    DeleteHeaderNumber,
    DeleteBlockBody,
}

impl StoreOperation {
    /// Log message for a failure of this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::WriteTxLookup => "Failed to store transaction lookup entry",
            Self::DeleteTxLookup => "Failed to delete transaction lookup entry",
            Self::WriteBloomBits => "Failed to store bloom bits",
            Self::DeleteBloomBits => "Failed to delete bloom bits",
            Self::WriteCanonicalHash => "Failed to store number to hash mapping",
            Self::WriteHeaderNumber => "Failed to store hash to number mapping",
            Self::WriteBlockBody => "Failed to store block body",
            Self::DeleteCanonicalHash => "Failed to delete number to hash mapping",
            Self::DeleteHeaderNumber => "Failed to delete hash to number mapping",
            Self::DeleteBlockBody => "Failed to delete block body",
        }
    }
}

/// The store failed in a way the index cannot work around.
///
/// Never retried. The node runtime turns it into an abort signal and a
/// non-zero exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .operation.failure_message(), .source)]
pub struct Unrecoverable {
    pub operation: StoreOperation,
    #[source]
    pub source: KVStoreError,
}

impl Unrecoverable {
    pub fn new(operation: StoreOperation, source: KVStoreError) -> Self {
        Self { operation, source }
    }

    /// Log the failure at error level and build the error.
    pub(crate) fn reported(operation: StoreOperation, source: KVStoreError) -> Self {
        tracing::error!(error = %source, "{}", operation.failure_message());
        Self::new(operation, source)
    }
}

//! # RocksDB Storage Adapter
//!
//! Production [`KeyValueStore`] backed by a single RocksDB column family.
//!
//! ## Configuration
//!
//! - Snappy compression
//! - Bloom filters (10 bits per key)
//! - LRU block cache (256MB default)
//! - Optional fsync on every write

use std::path::{Path, PathBuf};

use rocksdb::{
    BlockBasedOptions, Cache, DBCompressionType, DBRawIterator, Options, WriteOptions, DB,
};

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, KvIterator};

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 256MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 64MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/ledger"),
            block_cache_size: 256 * 1024 * 1024,
            write_buffer_size: 64 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Small buffers, no sync.
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store.
pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a database.
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(DBCompressionType::Snappy);

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| KVStoreError::IOError {
            message: format!("Failed to open RocksDB: {}", e),
        })?;

        tracing::info!(path = %config.path.display(), "Opened RocksDB store");
        Ok(Self { db, config })
    }

    /// Open with default tuning.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        Self::open(RocksDbConfig {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        })
    }

    fn write_options(&self) -> WriteOptions {
        let mut opts = WriteOptions::default();
        opts.set_sync(self.config.sync_writes);
        opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .put_opt(key, value, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB put failed: {}", e),
            })
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .delete_opt(key, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB delete failed: {}", e),
            })
    }

    fn new_iterator<'a>(&'a self, prefix: &[u8], start: &[u8]) -> Box<dyn KvIterator + 'a> {
        let mut seek = prefix.to_vec();
        seek.extend_from_slice(start);

        let mut raw = self.db.raw_iterator();
        raw.seek(&seek);
        Box::new(RocksIterator {
            raw,
            prefix: prefix.to_vec(),
            started: false,
            positioned: false,
        })
    }
}

/// Cursor over a RocksDB key range. The underlying iterator is released on
/// drop.
struct RocksIterator<'a> {
    raw: DBRawIterator<'a>,
    prefix: Vec<u8>,
    started: bool,
    positioned: bool,
}

impl KvIterator for RocksIterator<'_> {
    fn next(&mut self) -> bool {
        // The raw iterator already sits on the first candidate after seek.
        if self.started {
            self.raw.next();
        }
        self.started = true;
        self.positioned = self.raw.valid()
            && self
                .raw
                .key()
                .is_some_and(|key| key.starts_with(&self.prefix));
        self.positioned
    }

    fn key(&self) -> &[u8] {
        if !self.positioned {
            return &[];
        }
        self.raw.key().unwrap_or(&[])
    }

    fn value(&self) -> &[u8] {
        if !self.positioned {
            return &[];
        }
        self.raw.value().unwrap_or(&[])
    }

    fn error(&self) -> Option<KVStoreError> {
        self.raw.status().err().map(|e| KVStoreError::IOError {
            message: format!("RocksDB iteration failed: {}", e),
        })
    }
}

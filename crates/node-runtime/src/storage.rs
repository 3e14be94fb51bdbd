//! Store selection.

use std::sync::Arc;

use tracing::info;
use tx_lookup::{InMemoryKVStore, KeyValueStore};

use crate::config::{ConfigError, RuntimeConfig, StoreBackend};

/// Store shared by every component of the runtime.
pub type DynStore = Arc<dyn KeyValueStore>;

/// Store opening errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open store: {0}")]
    Open(#[from] tx_lookup::KVStoreError),
}

/// Open the backend selected in `config`.
pub fn open_store(config: &RuntimeConfig) -> Result<DynStore, StoreError> {
    match config.store {
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(InMemoryKVStore::new()))
        }
        StoreBackend::RocksDb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &RuntimeConfig) -> Result<DynStore, StoreError> {
    use tx_lookup::{RocksDbConfig, RocksDbStore};

    let store = RocksDbStore::open(RocksDbConfig {
        path: config.data_dir.join("ledger"),
        ..Default::default()
    })?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &RuntimeConfig) -> Result<DynStore, StoreError> {
    Err(ConfigError::BackendUnavailable(StoreBackend::RocksDb.name()).into())
}

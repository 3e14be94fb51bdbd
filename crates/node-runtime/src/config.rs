//! # Runtime Configuration
//!
//! Read from environment variables with sane defaults.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `LEDGER_DATA_DIR` | `./data` | Database directory |
//! | `LEDGER_STORE` | `memory` | `memory` or `rocksdb` |
//! | `LEDGER_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `LEDGER_JSON_LOGS` | `false` | JSON log lines |
//! | `LEDGER_INTEGRITY_CHECK_SECS` | `60` | Integrity monitor interval |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use big_bits::MonitorConfig;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
    /// The selected store backend was not compiled in.
    #[error("store backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),
}

/// Key-value store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Ephemeral, lost on exit.
    #[default]
    Memory,
    /// On-disk RocksDB under the data directory.
    RocksDb,
}

impl StoreBackend {
    pub fn name(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::RocksDb => "rocksdb",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "rocksdb" | "rocks" => Ok(Self::RocksDb),
            _ => Err(ConfigError::InvalidValue {
                var: "LEDGER_STORE",
                value: s.to_string(),
                reason: "expected 'memory' or 'rocksdb'",
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (trace, debug, info, warn, error, or per-target)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Database directory.
    pub data_dir: PathBuf,
    /// Store backend.
    pub store: StoreBackend,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Integrity monitor configuration.
    pub monitor: MonitorConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store: StoreBackend::default(),
            logging: LoggingConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup("LEDGER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(store) = lookup("LEDGER_STORE") {
            config.store = store.parse()?;
        }

        if let Some(level) = lookup("LEDGER_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.logging.level = level;
        }

        if let Some(json) = lookup("LEDGER_JSON_LOGS") {
            config.logging.json = json.eq_ignore_ascii_case("true") || json == "1";
        }

        if let Some(secs) = lookup("LEDGER_INTEGRITY_CHECK_SECS") {
            let parsed: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                var: "LEDGER_INTEGRITY_CHECK_SECS",
                value: secs.clone(),
                reason: "expected a whole number of seconds",
            })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "LEDGER_INTEGRITY_CHECK_SECS",
                    value: secs,
                    reason: "interval must be positive",
                });
            }
            config.monitor = MonitorConfig::with_interval(Duration::from_secs(parsed));
        }

        Ok(config)
    }
}

//! # Ledger Index Node Runtime
//!
//! Hosts the transaction lookup index and the constant integrity monitor.
//!
//! ## Modular Structure
//!
//! - `config` - Environment-driven configuration
//! - `telemetry` - `tracing` subscriber setup
//! - `storage` - Store backend selection
//! - `import` - Block import and rollback
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialise logging
//! 3. Open the store
//! 4. Spawn the integrity monitor
//! 5. Wait for Ctrl-C or an abort signal
//!
//! ## Termination
//!
//! All background tasks share one `watch` channel of [`ShutdownSignal`].
//! Ctrl-C publishes `Shutdown` and the process exits with code 0. An
//! integrity violation or an [`Unrecoverable`] store failure publishes
//! `Abort` and the process exits non-zero.

pub mod config;
pub mod import;
pub mod storage;
pub mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use big_bits::{IntegrityMonitor, ProcessConstants};
use shared_types::ShutdownSignal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tx_lookup::Unrecoverable;

pub use crate::config::{ConfigError, LoggingConfig, RuntimeConfig, StoreBackend};
pub use crate::import::{BlockImporter, LookupService};
pub use crate::storage::{open_store, DynStore, StoreError};

/// Why the runtime stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// Orderly shutdown.
    Shutdown,
    /// Unrecoverable fault.
    Abort(String),
}

impl ExitReason {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Shutdown => ExitCode::SUCCESS,
            Self::Abort(_) => ExitCode::FAILURE,
        }
    }
}

/// The node runtime.
pub struct NodeRuntime {
    config: RuntimeConfig,
    importer: BlockImporter<DynStore>,
    /// Shutdown signal sender, shared with background tasks.
    signal: Arc<watch::Sender<ShutdownSignal>>,
    monitor: Option<JoinHandle<()>>,
}

impl NodeRuntime {
    /// Open the configured store and build the runtime.
    pub fn new(config: RuntimeConfig) -> Result<Self, StoreError> {
        let store = open_store(&config)?;
        Ok(Self::with_store(config, store))
    }

    /// Build the runtime over an already opened store.
    pub fn with_store(config: RuntimeConfig, store: DynStore) -> Self {
        let (signal, _) = watch::channel(ShutdownSignal::Running);
        Self {
            importer: BlockImporter::new(Arc::new(store)),
            signal: Arc::new(signal),
            monitor: None,
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn importer(&self) -> &BlockImporter<DynStore> {
        &self.importer
    }

    /// Sender side of the shutdown channel.
    pub fn signal(&self) -> Arc<watch::Sender<ShutdownSignal>> {
        Arc::clone(&self.signal)
    }

    /// Spawn background tasks. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if self.monitor.is_some() {
            warn!("Runtime already started");
            return;
        }

        info!(
            store = self.config.store.name(),
            data_dir = %self.config.data_dir.display(),
            check_interval_secs = self.config.monitor.check_interval.as_secs(),
            "Starting ledger index runtime"
        );

        let monitor = IntegrityMonitor::new(ProcessConstants, self.config.monitor.clone());
        self.monitor = Some(monitor.spawn(self.signal()));
    }

    /// Convert a store failure into an abort of the whole process.
    ///
    /// Use as the terminal handler for any `Err(Unrecoverable)` surfaced by the
    /// importer or the lookup service.
    pub fn abort_on(&self, err: &Unrecoverable) {
        error!(operation = ?err.operation, error = %err, "Unrecoverable store failure");
        self.signal.send_replace(ShutdownSignal::abort(err.to_string()));
    }

    /// Request an orderly shutdown. Has no effect once an abort is pending.
    pub fn request_shutdown(&self) {
        self.signal.send_if_modified(|current| {
            if current.is_running() {
                *current = ShutdownSignal::Shutdown;
                true
            } else {
                false
            }
        });
    }

    /// Wait until the signal leaves `Running`.
    pub async fn wait(&self) -> ExitReason {
        let mut rx = self.signal.subscribe();
        loop {
            if let Some(reason) = Self::exit_reason(&rx.borrow_and_update()) {
                return reason;
            }
            if rx.changed().await.is_err() {
                return ExitReason::Shutdown;
            }
        }
    }

    /// Stop background tasks and report why the runtime ended.
    pub async fn shutdown(&mut self) -> ExitReason {
        self.request_shutdown();

        if let Some(handle) = self.monitor.take() {
            if let Err(e) = handle.await {
                error!(error = %e, "Integrity monitor task failed");
            }
        }

        let reason = Self::exit_reason(&self.signal.borrow()).unwrap_or(ExitReason::Shutdown);
        match &reason {
            ExitReason::Shutdown => info!("Shutdown complete"),
            ExitReason::Abort(cause) => error!(cause = %cause, "Runtime aborted"),
        }
        reason
    }

    fn exit_reason(signal: &ShutdownSignal) -> Option<ExitReason> {
        match signal {
            ShutdownSignal::Running => None,
            ShutdownSignal::Shutdown => Some(ExitReason::Shutdown),
            ShutdownSignal::Abort { reason } => Some(ExitReason::Abort(reason.clone())),
        }
    }
}

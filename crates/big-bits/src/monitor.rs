//! # Constant Integrity Monitor
//!
//! Background watchdog for the canonical constant set. Every
//! `check_interval` it re-derives each value and compares it with the
//! monitor's startup snapshot and with the shared set. A mismatch means
//! memory corruption: the monitor publishes one [`ShutdownSignal::Abort`] and
//! stops. It never attempts recovery.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use shared_types::ShutdownSignal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::constants::{common, Constant, ConstantSet};
use crate::error::{IntegrityViolation, ViolationSite};

/// Default interval between checks.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between two integrity checks (default: 60s).
    pub check_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl MonitorConfig {
    /// Config with a custom interval.
    pub fn with_interval(check_interval: Duration) -> Self {
        Self { check_interval }
    }
}

/// Where the monitor reads the shared constant set from.
pub trait ConstantSource: Send + Sync + 'static {
    /// Current contents of the shared set.
    fn load(&self) -> ConstantSet;
}

/// The process-wide registry returned by [`common`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessConstants;

impl ConstantSource for ProcessConstants {
    fn load(&self) -> ConstantSet {
        common().clone()
    }
}

impl ConstantSource for RwLock<ConstantSet> {
    fn load(&self) -> ConstantSet {
        self.read().clone()
    }
}

impl<T: ConstantSource> ConstantSource for Arc<T> {
    fn load(&self) -> ConstantSet {
        (**self).load()
    }
}

/// Watchdog over a [`ConstantSource`].
pub struct IntegrityMonitor<S> {
    source: S,
    snapshot: ConstantSet,
    config: MonitorConfig,
}

impl<S: ConstantSource> IntegrityMonitor<S> {
    /// Capture an independent snapshot and prepare the monitor.
    pub fn new(source: S, config: MonitorConfig) -> Self {
        Self {
            source,
            snapshot: ConstantSet::derive(),
            config,
        }
    }

    /// Run one comparison pass.
    pub fn check(&self) -> Result<(), IntegrityViolation> {
        let canonical = ConstantSet::derive();
        let shared = self.source.load();

        for constant in Constant::ALL {
            let expected = canonical.get(constant);
            if self.snapshot.get(constant) != expected {
                return Err(IntegrityViolation {
                    constant: constant.name(),
                    site: ViolationSite::Snapshot,
                });
            }
            if shared.get(constant) != expected {
                return Err(IntegrityViolation {
                    constant: constant.name(),
                    site: ViolationSite::Shared,
                });
            }
        }
        Ok(())
    }

    /// Spawn [`Self::run`] on the current tokio runtime.
    pub fn spawn(self, signal: Arc<watch::Sender<ShutdownSignal>>) -> JoinHandle<()> {
        tokio::spawn(self.run(signal))
    }

    /// Check on every tick until the signal channel leaves `Running` or a
    /// violation is found. On violation, writes exactly one abort signal.
    pub async fn run(self, signal: Arc<watch::Sender<ShutdownSignal>>) {
        let mut shutdown = signal.subscribe();
        if !shutdown.borrow_and_update().is_running() {
            return;
        }

        let mut ticker = tokio::time::interval(self.config.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the first check happens one
        // full interval after start.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(violation) = self.check() {
                        error!(
                            constant = violation.constant,
                            site = %violation.site,
                            "A common value has mutated, exiting now"
                        );
                        signal.send_replace(ShutdownSignal::abort(violation.to_string()));
                        return;
                    }
                    debug!("Common values verified");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || !shutdown.borrow_and_update().is_running() {
                        debug!("Integrity monitor stopping");
                        return;
                    }
                }
            }
        }
    }
}

//! Runtime shutdown signal.

/// Value carried on the node's `tokio::sync::watch` shutdown channel.
///
/// The runtime owns the sender; background tasks subscribe to it and may also
/// publish an [`ShutdownSignal::Abort`] when they detect an unrecoverable
/// fault.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShutdownSignal {
    /// Normal operation.
    #[default]
    Running,
    /// Orderly shutdown requested (e.g. Ctrl-C).
    Shutdown,
    /// Unrecoverable fault; the process must terminate.
    Abort {
        /// Human-readable cause, logged by the runtime on exit.
        reason: String,
    },
}

impl ShutdownSignal {
    /// Build an abort signal.
    pub fn abort(reason: impl Into<String>) -> Self {
        Self::Abort {
            reason: reason.into(),
        }
    }

    /// True while no shutdown or abort has been requested.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// True if this signal requests process termination after a fault.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort { .. })
    }
}

//! Error types for big-bits arithmetic and the integrity monitor.

use std::fmt;
use thiserror::Error;

/// Errors from log-domain conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigBitsError {
    /// `log2(0)` is undefined.
    #[error("binary logarithm of zero is undefined")]
    ZeroMagnitude,
}

/// Where a mutated constant was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSite {
    /// The monitor's own startup snapshot.
    Snapshot,
    /// The shared process-wide set.
    Shared,
}

impl fmt::Display for ViolationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationSite::Snapshot => write!(f, "snapshot"),
            ViolationSite::Shared => write!(f, "shared"),
        }
    }
}

/// A canonical constant no longer matches its construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("common value {constant} has mutated ({site} copy)")]
pub struct IntegrityViolation {
    /// Name of the mutated constant.
    pub constant: &'static str,
    /// Which copy disagreed.
    pub site: ViolationSite,
}

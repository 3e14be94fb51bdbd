//! # ledger-indexd
//!
//! Runs the ledger index runtime until Ctrl-C or an unrecoverable fault.
//!
//! Exit codes: `0` after Ctrl-C, `1` after an abort or a startup failure.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use node_runtime::{telemetry, ExitReason, NodeRuntime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = RuntimeConfig::from_env().context("Invalid configuration")?;
    telemetry::init_logging(&config.logging).context("Failed to initialise logging")?;

    let mut runtime = NodeRuntime::new(config).context("Failed to open store")?;
    runtime.start();

    info!("Ledger index running. Press Ctrl+C to stop.");
    tokio::select! {
        reason = runtime.wait() => {
            if let ExitReason::Abort(cause) = &reason {
                info!(cause = %cause, "Abort signal received");
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Ctrl+C received");
        }
    }

    let reason = runtime.shutdown().await;
    Ok(reason.exit_code())
}

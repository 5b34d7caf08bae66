//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, then trigger `shutdown`.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            // Without a handler the process can only be killed; keep serving.
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            return;
        }
    }
    shutdown.trigger();
}

//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast handle that tells the server to stop accepting connections.
///
/// The binary triggers it on Ctrl+C; tests trigger it directly to tear a
/// server down at the end of a case.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe before the server starts, or the signal may be missed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let receivers = self.tx.send(()).unwrap_or(0);
        tracing::debug!(receivers, "Shutdown triggered");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` fires or its sender is gone.
pub async fn wait_for(mut rx: broadcast::Receiver<()>) {
    // Lagged or closed both mean the server should stop.
    let _ = rx.recv().await;
}

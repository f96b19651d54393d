//! Ctrl+C handling for the turn loop

use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use crate::storage::TxLog;

/// Forwards the first interrupt to the turn loop, which stops at the next
/// turn boundary. A second interrupt saves the report right away and
/// returns `true`; the caller should then exit without waiting for the turn.
pub async fn relay_interrupts<F, Fut>(
    mut next_signal: F,
    shutdown_tx: oneshot::Sender<()>,
    tx_log: Arc<TxLog>,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = next_signal().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return false;
    }
    info!("\n📛 Received shutdown signal (Ctrl+C), finishing current turn...");
    let _ = shutdown_tx.send(());

    if let Err(e) = next_signal().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return false;
    }
    warn!("📛 Second Ctrl+C, saving report and exiting now");
    if let Err(e) = tx_log.flush().await {
        error!("Failed to save execution report: {}", e);
    }
    true
}

//! Periodic expiration task for the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::store::Store;

/// Run the sweep on a fixed period until the shutdown signal flips.
///
/// Each pass takes the store's exclusive lock exactly like any external
/// write; no cooperation from other callers is required. The first sweep
/// happens one full period after startup.
pub async fn run_sweeper(store: Arc<Store>, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(period);
    // The first interval tick completes immediately; consume it so the
    // loop sleeps a full period before the first sweep.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                store.sweep().await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("sweeper shutting down");
                    return;
                }
            }
        }
    }
}

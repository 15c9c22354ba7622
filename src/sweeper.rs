//! Background expiry sweeper
//!
//! Lazy expiry removes a dead entry only when its key is touched again; a
//! key that is never read back would otherwise pin its memory forever. The
//! sweeper purges expired entries on an interval, acquiring the same shard
//! locks as foreground operations so the two never race.

use crate::engine::KvEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Handle to the running sweeper task
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
}

impl Sweeper {
    /// Spawn the sweeper on the current tokio runtime
    pub fn start(engine: Arc<KvEngine>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(sweep_loop(engine, interval, shutdown_rx));

        info!(interval_ms = interval.as_millis() as u64, "expiry sweeper started");

        Sweeper { shutdown_tx }
    }

    /// Stop the sweeper; called automatically on drop
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn sweep_loop(
    engine: Arc<KvEngine>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("expiry sweeper shutting down");
                    return;
                }
            }
        }

        let purged = engine.purge_expired();
        if purged > 0 {
            debug!(purged, live_keys = engine.len(), "removed expired keys");
        }
    }
}

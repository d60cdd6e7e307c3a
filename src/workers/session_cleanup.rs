use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::sessions::SessionRegistry;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

pub async fn run(registry: &SessionRegistry) -> usize {
    tracing::debug!("session_cleanup: start");
    let cleaned = registry.sweep_idle().await;
    let active = registry.len().await;
    tracing::info!(cleaned, active, "session_cleanup: done");
    cleaned
}

/// Sweeps idle sessions every `interval` until shutdown is broadcast.
pub fn spawn(
    registry: Arc<SessionRegistry>,
    interval: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick fires immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    run(&registry).await;
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("session_cleanup: stopping");
                    break;
                }
            }
        }
    })
}

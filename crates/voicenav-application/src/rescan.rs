//! Periodic catalog rescans.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::map_catalog::{MapCatalog, ScanOutcome};

/// Spawns a task that calls [`MapCatalog::refresh`] every `period` until
/// `cancel` fires.
///
/// The first rescan happens one `period` after spawning; callers run the
/// startup scan themselves. Ticks that fall behind are skipped rather than
/// bunched up, and ticks that overlap an in-flight scan are coalesced by the
/// catalog.
pub fn spawn_rescan_loop(
    catalog: Arc<MapCatalog>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("rescan loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match catalog.refresh().await {
                        Ok(ScanOutcome::Applied(snapshot)) => {
                            tracing::debug!(generations = snapshot.len(), "periodic rescan applied");
                        }
                        Ok(ScanOutcome::Coalesced) => {}
                        Err(e) => tracing::warn!(error = %e, "periodic rescan failed"),
                    }
                }
            }
        }
    })
}

//! services/client/src/session/poller.rs
//!
//! Cancellable repeating tasks that keep the session synchronized with the
//! backing service. Each poller is a spawned loop that selects between its
//! interval tick and a `CancellationToken`, so tearing down the owning view
//! stops the timer deterministically and no callback fires afterwards.

use crate::session::controller::SessionController;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Spawns the document-presence poller: refreshes the session from `/status`
/// and re-evaluates the sample-question cache on every tick. The first tick
/// fires immediately.
pub fn spawn_status_poller(
    controller: Arc<SessionController>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("status poller stopped");
                    return;
                }
                _ = ticker.tick() => {
                    controller.refresh_status().await;
                    controller.ensure_sample_questions().await;
                }
            }
        }
    })
}

/// Spawns the lower-frequency raw connectivity check feeding the banner.
pub fn spawn_connectivity_poller(
    controller: Arc<SessionController>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("connectivity poller stopped");
                    return;
                }
                _ = ticker.tick() => {
                    controller.check_connectivity().await;
                }
            }
        }
    })
}
